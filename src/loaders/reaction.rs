use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::batch_function::{BatchFunction, BatchOutcome};
use crate::models::{ProposalId, Reaction, ReactionCount, UserProposalReactionKey};
use crate::store::StoreHandle;

/// Loads the reaction counts of each proposal.
///
/// Every requested proposal gets an entry, empty when nobody reacted. Counts are ordered most
/// popular first, ties by reaction name.
pub struct ProposalReactionCountBatch;

#[async_trait]
impl BatchFunction<ProposalId, Vec<ReactionCount>> for ProposalReactionCountBatch {
    type Context = StoreHandle;

    async fn load(
        keys: &[ProposalId],
        store: &StoreHandle,
    ) -> BatchOutcome<ProposalId, Vec<ReactionCount>> {
        let rows = store.fetch_reaction_counts(keys).await?;

        let mut grouped: BTreeMap<ProposalId, Vec<ReactionCount>> =
            keys.iter().map(|k| (*k, Vec::new())).collect();
        for row in rows {
            if let Some(counts) = grouped.get_mut(&row.proposal_id) {
                counts.push(row.into());
            }
        }

        Ok(grouped
            .into_iter()
            .map(|(proposal_id, mut counts)| {
                counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.reaction.cmp(&b.reaction)));
                (proposal_id, Ok(counts))
            })
            .collect())
    }
}

/// Loads a single user's reaction to a proposal.
pub struct UserProposalReactionBatch;

#[async_trait]
impl BatchFunction<UserProposalReactionKey, Reaction> for UserProposalReactionBatch {
    type Context = StoreHandle;

    async fn load(
        keys: &[UserProposalReactionKey],
        store: &StoreHandle,
    ) -> BatchOutcome<UserProposalReactionKey, Reaction> {
        let reactions = store.fetch_user_reactions(keys).await?;
        Ok(reactions.into_iter().map(|r| (r.key(), Ok(r))).collect())
    }
}
