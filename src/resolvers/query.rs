use crate::connection::Connection;
use crate::context::RequestContext;
use crate::error::{ResolveError, ResolveResult};
use crate::models::{Proposal, ProposalId, QueryProposalsInput};
use crate::store::ProposalFilter;

/// Scope of a `proposals` query: a related address wins over a status filter.
pub fn proposal_filter(input: &QueryProposalsInput) -> ProposalFilter {
    match (&input.address, input.status) {
        (Some(address), _) if !address.is_empty() => ProposalFilter::RelatedAddress(address.clone()),
        (_, Some(status)) => ProposalFilter::Status(status.to_proposal_status()),
        _ => ProposalFilter::All,
    }
}

#[tracing::instrument(skip(ctx))]
pub async fn proposals(
    ctx: &RequestContext,
    input: QueryProposalsInput,
) -> ResolveResult<Connection<Proposal>> {
    let filter = proposal_filter(&input);
    let first = ctx.config.pagination.page_size(input.first);

    let page = ctx
        .cancellable(ctx.queries.query_paginated_proposals(&filter, first, input.after))
        .await?
        .map_err(ResolveError::Proposals)?;
    tracing::debug!(returned = page.items.len(), total = page.pagination_info.total_count);

    Ok(Connection::from_page(page, input.after))
}

#[tracing::instrument(skip(ctx))]
pub async fn proposal_by_id(ctx: &RequestContext, id: ProposalId) -> ResolveResult<Option<Proposal>> {
    Ok(ctx.loaders.load_proposal(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProposalStatus, ProposalStatusFilter};

    #[test]
    fn address_scope_wins_over_status() {
        let input = QueryProposalsInput {
            address: Some("like1abc".to_owned()),
            status: Some(ProposalStatusFilter::Passed),
            ..Default::default()
        };
        assert_eq!(proposal_filter(&input), ProposalFilter::RelatedAddress("like1abc".to_owned()));
    }

    #[test]
    fn empty_address_falls_back_to_status() {
        let input = QueryProposalsInput {
            address: Some(String::new()),
            status: Some(ProposalStatusFilter::VotingPeriod),
            ..Default::default()
        };
        assert_eq!(proposal_filter(&input), ProposalFilter::Status(ProposalStatus::VotingPeriod));
        assert_eq!(proposal_filter(&QueryProposalsInput::default()), ProposalFilter::All);
    }
}
