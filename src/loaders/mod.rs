//! Domain loaders: one [`BatchFunction`](crate::BatchFunction) per entity or relationship,
//! bundled into a per-request [`DataLoaders`].
//!
//! Single-entity loaders resolve to `Option<T>`; collection loaders resolve to a (possibly empty)
//! `Vec<T>` per parent key.

mod proposal;
mod reaction;
mod validator;

pub use proposal::{ProposalByIdBatch, ProposalTallyBatch};
pub use reaction::{ProposalReactionCountBatch, UserProposalReactionBatch};
pub use validator::ValidatorBySelfDelegationBatch;

use crate::error::{LoadError, LoadResult};
use crate::loader::{Loader, LoaderOptions};
use crate::models::{
    Proposal, ProposalId, ProposalTallyResult, Reaction, ReactionCount, UserProposalReactionKey,
    Validator,
};
use crate::store::StoreHandle;

/// All loaders of one request. Build a fresh one per GraphQL operation; dropping it stops the
/// loader workers and discards their caches.
pub struct DataLoaders {
    pub proposal: Loader<ProposalId, Proposal>,
    pub proposal_tally: Loader<ProposalId, ProposalTallyResult>,
    pub proposal_reaction_count: Loader<ProposalId, Vec<ReactionCount>>,
    pub user_proposal_reaction: Loader<UserProposalReactionKey, Reaction>,
    pub validator_by_self_delegation: Loader<String, Validator>,
}

impl DataLoaders {
    /// Must be called from within a tokio runtime: each loader spawns its worker task.
    pub fn new(store: StoreHandle, options: LoaderOptions) -> Self {
        Self {
            proposal: Loader::with_options(ProposalByIdBatch, store.clone(), options.clone()),
            proposal_tally: Loader::with_options(ProposalTallyBatch, store.clone(), options.clone()),
            proposal_reaction_count: Loader::with_options(
                ProposalReactionCountBatch,
                store.clone(),
                options.clone(),
            ),
            user_proposal_reaction: Loader::with_options(
                UserProposalReactionBatch,
                store.clone(),
                options.clone(),
            ),
            validator_by_self_delegation: Loader::with_options(
                ValidatorBySelfDelegationBatch,
                store,
                options,
            ),
        }
    }

    pub async fn load_proposal(&self, id: ProposalId) -> LoadResult<Proposal> {
        self.proposal.load(id).await
    }

    pub async fn load_proposal_tally_result(
        &self,
        proposal_id: ProposalId,
    ) -> LoadResult<ProposalTallyResult> {
        self.proposal_tally.load(proposal_id).await
    }

    /// Reaction counts of a proposal; empty when nobody reacted.
    pub async fn load_proposal_reaction_count(
        &self,
        proposal_id: ProposalId,
    ) -> Result<Vec<ReactionCount>, LoadError> {
        Ok(self.proposal_reaction_count.load(proposal_id).await?.unwrap_or_default())
    }

    pub async fn load_user_proposal_reaction(
        &self,
        key: UserProposalReactionKey,
    ) -> LoadResult<Reaction> {
        self.user_proposal_reaction.load(key).await
    }

    pub async fn load_validator_with_info_by_self_delegation_address(
        &self,
        address: &str,
    ) -> LoadResult<Validator> {
        self.validator_by_self_delegation.load(address.to_owned()).await
    }
}
