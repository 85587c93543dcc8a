use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::base::{new_id, new_timestamp};
use super::ProposalId;

/// A user's reaction (an emoji short name) to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: String,
    pub proposal_id: ProposalId,
    pub user_address: String,
    pub reaction: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(proposal_id: ProposalId, user_address: &str, reaction: &str) -> Self {
        let now = new_timestamp();
        Self {
            id: new_id(),
            proposal_id,
            user_address: user_address.to_owned(),
            reaction: reaction.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> UserProposalReactionKey {
        UserProposalReactionKey {
            proposal_id: self.proposal_id,
            user_address: self.user_address.clone(),
        }
    }
}

/// Looks up one user's reaction to one proposal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserProposalReactionKey {
    pub proposal_id: ProposalId,
    pub user_address: String,
}

/// Aggregate row returned by the store: how many users chose `reaction` on a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionCountRow {
    pub proposal_id: ProposalId,
    pub reaction: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub reaction: String,
    pub count: i64,
}

impl From<ReactionCountRow> for ReactionCount {
    fn from(row: ReactionCountRow) -> Self {
        Self { reaction: row.reaction, count: row.count }
    }
}
