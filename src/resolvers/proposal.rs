use crate::context::RequestContext;
use crate::error::{ResolveError, ResolveResult};
use crate::models::{
    Proposal, ProposalId, ProposalTallyResult, ProposalType, ReactionCount,
    UserProposalReactionKey,
};

pub fn proposal_id(obj: &Proposal) -> ProposalId {
    obj.id
}

/// Unrecognized stored types resolve to null rather than failing the query.
pub fn proposal_type(obj: &Proposal) -> Option<ProposalType> {
    match obj.proposal_type.parse() {
        Ok(proposal_type) => Some(proposal_type),
        Err(error) => {
            tracing::warn!(proposal_id = obj.id, %error, "unrecognized proposal type");
            None
        }
    }
}

#[tracing::instrument(skip_all, fields(proposal_id = obj.id))]
pub async fn deposit_total(ctx: &RequestContext, obj: &Proposal) -> ResolveResult<i64> {
    let denom = ctx.config.chain.coin_denom.as_str();
    let total = ctx.cancellable(ctx.queries.query_proposal_deposit_total(obj.id, denom)).await??;
    Ok(total)
}

/// Tally of the proposal; always null for failed, invalid and deposit-period proposals.
#[tracing::instrument(skip_all, fields(proposal_id = obj.id, status = %obj.status))]
pub async fn tally_result(
    ctx: &RequestContext,
    obj: &Proposal,
) -> ResolveResult<Option<ProposalTallyResult>> {
    if obj.status.suppresses_tally() {
        return Ok(None);
    }
    ctx.loaders.load_proposal_tally_result(obj.id).await.map_err(ResolveError::TallyResult)
}

#[tracing::instrument(skip_all, fields(proposal_id = obj.id))]
pub async fn reactions(ctx: &RequestContext, obj: &Proposal) -> ResolveResult<Vec<ReactionCount>> {
    Ok(ctx.loaders.load_proposal_reaction_count(obj.id).await?)
}

/// The signed-in user's reaction to the proposal; null when signed out or not reacted.
#[tracing::instrument(skip_all, fields(proposal_id = obj.id))]
pub async fn my_reaction(ctx: &RequestContext, obj: &Proposal) -> ResolveResult<Option<String>> {
    let Some(user_address) = ctx.authed_user_address() else {
        return Ok(None);
    };
    let key = UserProposalReactionKey {
        proposal_id: obj.id,
        user_address: user_address.to_owned(),
    };
    let reaction = ctx.loaders.load_user_proposal_reaction(key).await?;
    Ok(reaction.map(|r| r.reaction))
}
