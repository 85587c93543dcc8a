use serde::{Deserialize, Serialize};

/// A validator joined with its description, keyed by its self-delegation (account) address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validator {
    pub operator_address: String,
    pub self_delegation_address: String,
    pub moniker: Option<String>,
    pub details: Option<String>,
    pub website: Option<String>,
    pub security_contact: Option<String>,
    pub jailed: bool,
    pub status: i32,
}
