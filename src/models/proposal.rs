use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownVariant;

pub type ProposalId = i64;

/// Proposal status as stored by the chain indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    #[serde(rename = "PROPOSAL_STATUS_DEPOSIT_PERIOD")]
    DepositPeriod,
    #[serde(rename = "PROPOSAL_STATUS_VOTING_PERIOD")]
    VotingPeriod,
    #[serde(rename = "PROPOSAL_STATUS_PASSED")]
    Passed,
    #[serde(rename = "PROPOSAL_STATUS_REJECTED")]
    Rejected,
    #[serde(rename = "PROPOSAL_STATUS_FAILED")]
    Failed,
    #[serde(rename = "PROPOSAL_STATUS_INVALID")]
    Invalid,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepositPeriod => "PROPOSAL_STATUS_DEPOSIT_PERIOD",
            Self::VotingPeriod => "PROPOSAL_STATUS_VOTING_PERIOD",
            Self::Passed => "PROPOSAL_STATUS_PASSED",
            Self::Rejected => "PROPOSAL_STATUS_REJECTED",
            Self::Failed => "PROPOSAL_STATUS_FAILED",
            Self::Invalid => "PROPOSAL_STATUS_INVALID",
        }
    }

    /// Statuses for which no meaningful tally exists.
    pub fn suppresses_tally(&self) -> bool {
        matches!(self, Self::Failed | Self::Invalid | Self::DepositPeriod)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "PROPOSAL_STATUS_DEPOSIT_PERIOD" => Self::DepositPeriod,
            "PROPOSAL_STATUS_VOTING_PERIOD" => Self::VotingPeriod,
            "PROPOSAL_STATUS_PASSED" => Self::Passed,
            "PROPOSAL_STATUS_REJECTED" => Self::Rejected,
            "PROPOSAL_STATUS_FAILED" => Self::Failed,
            "PROPOSAL_STATUS_INVALID" => Self::Invalid,
            _ => return Err(UnknownVariant::new("proposal status", s)),
        })
    }
}

/// Status filter accepted by the `proposals` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatusFilter {
    DepositPeriod,
    VotingPeriod,
    Passed,
    Rejected,
    Failed,
    Invalid,
}

impl ProposalStatusFilter {
    pub fn to_proposal_status(self) -> ProposalStatus {
        match self {
            Self::DepositPeriod => ProposalStatus::DepositPeriod,
            Self::VotingPeriod => ProposalStatus::VotingPeriod,
            Self::Passed => ProposalStatus::Passed,
            Self::Rejected => ProposalStatus::Rejected,
            Self::Failed => ProposalStatus::Failed,
            Self::Invalid => ProposalStatus::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalType {
    Text,
    ParameterChange,
    SoftwareUpgrade,
    CancelSoftwareUpgrade,
    CommunityPoolSpend,
}

impl FromStr for ProposalType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "TEXT" => Self::Text,
            "PARAMETER_CHANGE" => Self::ParameterChange,
            "SOFTWARE_UPGRADE" => Self::SoftwareUpgrade,
            "CANCEL_SOFTWARE_UPGRADE" => Self::CancelSoftwareUpgrade,
            "COMMUNITY_POOL_SPEND" => Self::CommunityPoolSpend,
            _ => return Err(UnknownVariant::new("proposal type", s)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    /// Raw type string as indexed; see [`ProposalType`].
    pub proposal_type: String,
    pub title: String,
    pub description: String,
    pub status: ProposalStatus,
    pub proposer_address: Option<String>,
    pub submit_time: DateTime<Utc>,
    pub deposit_end_time: DateTime<Utc>,
    pub voting_start_time: Option<DateTime<Utc>>,
    pub voting_end_time: Option<DateTime<Utc>>,
}

/// Aggregated vote amounts for one proposal. Amounts the indexer has not recorded are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalTallyResult {
    pub proposal_id: ProposalId,
    pub yes: Option<i64>,
    pub no: Option<i64>,
    pub no_with_veto: Option<i64>,
    pub abstain: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryProposalsInput {
    pub first: usize,
    pub after: usize,
    pub address: Option<String>,
    pub status: Option<ProposalStatusFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_store_string() {
        let status: ProposalStatus = "PROPOSAL_STATUS_VOTING_PERIOD".parse().unwrap();
        assert_eq!(status, ProposalStatus::VotingPeriod);
        assert_eq!(status.to_string(), "PROPOSAL_STATUS_VOTING_PERIOD");
        assert!("VOTING".parse::<ProposalStatus>().is_err());
    }

    #[test]
    fn tally_suppressed_statuses() {
        let suppressed = [
            ProposalStatus::Failed,
            ProposalStatus::Invalid,
            ProposalStatus::DepositPeriod,
        ];
        for status in suppressed {
            assert!(status.suppresses_tally(), "{status}");
        }
        for status in [ProposalStatus::VotingPeriod, ProposalStatus::Passed, ProposalStatus::Rejected]
        {
            assert!(!status.suppresses_tally(), "{status}");
        }
    }

    #[test]
    fn unknown_proposal_type() {
        let err = "SIGNALING".parse::<ProposalType>().unwrap_err();
        assert_eq!(err.to_string(), "\"SIGNALING\" is not a valid proposal type");
    }
}
