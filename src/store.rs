//! The data store seam.
//!
//! The indexed governance database lives outside this crate. Loaders reach it through the
//! `fetch_*` methods, one call per batch: each receives a deduplicated key set and may return zero
//! or more rows per key, in any order. Paginated list queries go through [`ProposalQuery`] directly
//! and bypass the loaders.

use async_trait::async_trait;

use crate::connection::Paginated;
use crate::error::StoreError;
use crate::models::{
    Proposal, ProposalId, ProposalStatus, ProposalTallyResult, Reaction, ReactionCountRow,
    UserProposalReactionKey, Validator,
};

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn fetch_proposals(&self, ids: &[ProposalId]) -> StoreResult<Vec<Proposal>>;

    async fn fetch_tally_results(
        &self,
        proposal_ids: &[ProposalId],
    ) -> StoreResult<Vec<ProposalTallyResult>>;
}

#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Reaction counts grouped by (proposal, reaction).
    async fn fetch_reaction_counts(
        &self,
        proposal_ids: &[ProposalId],
    ) -> StoreResult<Vec<ReactionCountRow>>;

    async fn fetch_user_reactions(
        &self,
        keys: &[UserProposalReactionKey],
    ) -> StoreResult<Vec<Reaction>>;
}

#[async_trait]
pub trait ValidatorStore: Send + Sync {
    async fn fetch_validators_by_self_delegation_address(
        &self,
        addresses: &[String],
    ) -> StoreResult<Vec<Validator>>;
}

/// Narrows the proposals returned by [`ProposalQuery::query_paginated_proposals`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProposalFilter {
    #[default]
    All,
    /// Proposals the address submitted, deposited on or voted on.
    RelatedAddress(String),
    Status(ProposalStatus),
}

#[async_trait]
pub trait ProposalQuery: Send + Sync {
    /// Returns at most `first` proposals after skipping `after`, newest first, together with the
    /// pagination metadata of the whole filtered set.
    async fn query_paginated_proposals(
        &self,
        filter: &ProposalFilter,
        first: usize,
        after: usize,
    ) -> StoreResult<Paginated<Proposal>>;

    /// Sum of deposits in `denom` made to a proposal.
    async fn query_proposal_deposit_total(
        &self,
        proposal_id: ProposalId,
        denom: &str,
    ) -> StoreResult<i64>;
}

/// Everything the resolvers need from the store.
pub trait GovernanceStore: ProposalStore + ReactionStore + ValidatorStore + ProposalQuery {}

impl<T> GovernanceStore for T where T: ProposalStore + ReactionStore + ValidatorStore + ProposalQuery {}

/// Shared handle to the store, used as the context of every domain loader.
pub type StoreHandle = std::sync::Arc<dyn GovernanceStore>;
