use async_trait::async_trait;

use crate::batch_function::{BatchFunction, BatchOutcome};
use crate::models::{Proposal, ProposalId, ProposalTallyResult};
use crate::store::StoreHandle;

/// Loads proposals by id.
pub struct ProposalByIdBatch;

#[async_trait]
impl BatchFunction<ProposalId, Proposal> for ProposalByIdBatch {
    type Context = StoreHandle;

    async fn load(keys: &[ProposalId], store: &StoreHandle) -> BatchOutcome<ProposalId, Proposal> {
        let proposals = store.fetch_proposals(keys).await?;
        Ok(proposals.into_iter().map(|p| (p.id, Ok(p))).collect())
    }
}

/// Loads the tally of each proposal.
pub struct ProposalTallyBatch;

#[async_trait]
impl BatchFunction<ProposalId, ProposalTallyResult> for ProposalTallyBatch {
    type Context = StoreHandle;

    async fn load(
        keys: &[ProposalId],
        store: &StoreHandle,
    ) -> BatchOutcome<ProposalId, ProposalTallyResult> {
        let tallies = store.fetch_tally_results(keys).await?;
        Ok(tallies.into_iter().map(|t| (t.proposal_id, Ok(t))).collect())
    }
}
