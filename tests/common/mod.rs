//! In-memory governance store shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use govgraph::models::{
    Proposal, ProposalId, ProposalStatus, ProposalTallyResult, Reaction, ReactionCountRow,
    UserProposalReactionKey, Validator,
};
use govgraph::store::{
    ProposalFilter, ProposalQuery, ProposalStore, ReactionStore, StoreResult, ValidatorStore,
};
use govgraph::{Config, Paginated, PaginationInfo, RequestContext, StoreError, StoreHandle};

/// A store call as observed by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Proposals(Vec<ProposalId>),
    Tallies(Vec<ProposalId>),
    ReactionCounts(Vec<ProposalId>),
    UserReactions(Vec<UserProposalReactionKey>),
    Validators(Vec<String>),
    Paginated(ProposalFilter, usize, usize),
    DepositTotal(ProposalId, String),
}

#[derive(Default)]
pub struct MemoryStore {
    pub proposals: Vec<Proposal>,
    pub tallies: Vec<ProposalTallyResult>,
    pub reaction_counts: Vec<ReactionCountRow>,
    pub reactions: Vec<Reaction>,
    pub validators: Vec<Validator>,
    pub deposits: HashMap<(ProposalId, String), i64>,
    /// When set, every call fails with this error.
    pub fail_with: Option<StoreError>,
    /// Every store call, in order.
    pub calls: Mutex<Vec<Call>>,
}

impl MemoryStore {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> StoreResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProposalStore for MemoryStore {
    async fn fetch_proposals(&self, ids: &[ProposalId]) -> StoreResult<Vec<Proposal>> {
        self.record(Call::Proposals(ids.to_vec()))?;
        Ok(self.proposals.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }

    async fn fetch_tally_results(
        &self,
        proposal_ids: &[ProposalId],
    ) -> StoreResult<Vec<ProposalTallyResult>> {
        self.record(Call::Tallies(proposal_ids.to_vec()))?;
        Ok(self.tallies.iter().filter(|t| proposal_ids.contains(&t.proposal_id)).cloned().collect())
    }
}

#[async_trait]
impl ReactionStore for MemoryStore {
    async fn fetch_reaction_counts(
        &self,
        proposal_ids: &[ProposalId],
    ) -> StoreResult<Vec<ReactionCountRow>> {
        self.record(Call::ReactionCounts(proposal_ids.to_vec()))?;
        Ok(self
            .reaction_counts
            .iter()
            .filter(|r| proposal_ids.contains(&r.proposal_id))
            .cloned()
            .collect())
    }

    async fn fetch_user_reactions(
        &self,
        keys: &[UserProposalReactionKey],
    ) -> StoreResult<Vec<Reaction>> {
        self.record(Call::UserReactions(keys.to_vec()))?;
        Ok(self.reactions.iter().filter(|r| keys.contains(&r.key())).cloned().collect())
    }
}

#[async_trait]
impl ValidatorStore for MemoryStore {
    async fn fetch_validators_by_self_delegation_address(
        &self,
        addresses: &[String],
    ) -> StoreResult<Vec<Validator>> {
        self.record(Call::Validators(addresses.to_vec()))?;
        Ok(self
            .validators
            .iter()
            .filter(|v| addresses.contains(&v.self_delegation_address))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProposalQuery for MemoryStore {
    async fn query_paginated_proposals(
        &self,
        filter: &ProposalFilter,
        first: usize,
        after: usize,
    ) -> StoreResult<Paginated<Proposal>> {
        self.record(Call::Paginated(filter.clone(), first, after))?;
        let mut matching = self
            .proposals
            .iter()
            .filter(|p| match filter {
                ProposalFilter::All => true,
                ProposalFilter::Status(status) => p.status == *status,
                ProposalFilter::RelatedAddress(address) => {
                    p.proposer_address.as_deref() == Some(address.as_str())
                }
            })
            .cloned()
            .collect::<Vec<_>>();
        matching.sort_by(|a, b| b.id.cmp(&a.id));

        let total = matching.len();
        let items = matching.into_iter().skip(after).take(first).collect::<Vec<_>>();
        let pagination_info = PaginationInfo::for_window(after, items.len(), total);
        Ok(Paginated { items, pagination_info })
    }

    async fn query_proposal_deposit_total(
        &self,
        proposal_id: ProposalId,
        denom: &str,
    ) -> StoreResult<i64> {
        self.record(Call::DepositTotal(proposal_id, denom.to_owned()))?;
        Ok(self.deposits.get(&(proposal_id, denom.to_owned())).copied().unwrap_or(0))
    }
}

pub fn proposal(id: ProposalId, status: ProposalStatus) -> Proposal {
    let submitted = Utc.with_ymd_and_hms(2022, 5, 1, 12, 0, 0).unwrap();
    Proposal {
        id,
        proposal_type: "TEXT".to_owned(),
        title: format!("Proposal #{id}"),
        description: "Signal support".to_owned(),
        status,
        proposer_address: None,
        submit_time: submitted,
        deposit_end_time: submitted + chrono::Duration::days(14),
        voting_start_time: None,
        voting_end_time: None,
    }
}

pub fn validator(self_delegation_address: &str, moniker: &str) -> Validator {
    Validator {
        operator_address: format!("{self_delegation_address}valoper"),
        self_delegation_address: self_delegation_address.to_owned(),
        moniker: Some(moniker.to_owned()),
        details: None,
        website: None,
        security_contact: None,
        jailed: false,
        status: 3,
    }
}

pub fn tally(proposal_id: ProposalId, yes: i64, no: i64) -> ProposalTallyResult {
    ProposalTallyResult {
        proposal_id,
        yes: Some(yes),
        no: Some(no),
        no_with_veto: Some(0),
        abstain: Some(0),
    }
}

/// Builds a request context over `store`, returning the store for call inspection.
pub fn context(store: MemoryStore) -> (RequestContext, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let handle: StoreHandle = store.clone();
    (RequestContext::new(handle, Arc::new(Config::default())), store)
}
