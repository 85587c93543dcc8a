use serde::{Deserialize, Serialize};

use super::{ProposalId, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalVoteOption {
    Yes,
    No,
    NoWithVeto,
    Abstain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalVote {
    pub proposal_id: ProposalId,
    pub voter_address: String,
    pub option: Option<ProposalVoteOption>,
}

/// Wraps a bare string where the schema expects an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringObject {
    pub value: String,
}

/// Who cast a vote: a known validator, or just the voting address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum ProposalVoter {
    Validator(Validator),
    #[serde(rename = "StringObject")]
    Address(StringObject),
}
