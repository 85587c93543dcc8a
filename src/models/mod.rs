//! Governance records as they come out of the indexed data store, plus the derived shapes the
//! resolvers hand back to the GraphQL engine.

pub mod base;
mod proposal;
mod reaction;
mod validator;
mod vote;

pub use proposal::{
    Proposal, ProposalId, ProposalStatus, ProposalStatusFilter, ProposalTallyResult, ProposalType,
    QueryProposalsInput,
};
pub use reaction::{Reaction, ReactionCount, ReactionCountRow, UserProposalReactionKey};
pub use validator::Validator;
pub use vote::{ProposalVote, ProposalVoteOption, ProposalVoter, StringObject};

/// Error returned when a stored string does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value:?} is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_owned() }
    }
}
