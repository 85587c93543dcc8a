use crate::context::RequestContext;
use crate::models::{ProposalVote, ProposalVoteOption, ProposalVoter, StringObject};

/// Resolves the voter to the validator whose self-delegation address cast the vote, falling back
/// to the bare address. Never fails.
#[tracing::instrument(skip_all, fields(voter = %obj.voter_address))]
pub async fn voter(ctx: &RequestContext, obj: &ProposalVote) -> ProposalVoter {
    let loaded = ctx
        .loaders
        .load_validator_with_info_by_self_delegation_address(&obj.voter_address)
        .await;
    match loaded {
        Ok(Some(validator)) => ProposalVoter::Validator(validator),
        Ok(None) => address(obj),
        Err(error) => {
            tracing::warn!(%error, "validator lookup failed; resolving voter as address");
            address(obj)
        }
    }
}

fn address(obj: &ProposalVote) -> ProposalVoter {
    ProposalVoter::Address(StringObject { value: obj.voter_address.clone() })
}

pub fn option(obj: &ProposalVote) -> Option<ProposalVoteOption> {
    obj.option
}
