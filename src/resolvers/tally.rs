use crate::models::{ProposalTallyResult, ProposalVoteOption};

pub fn yes(obj: &ProposalTallyResult) -> i64 {
    obj.yes.unwrap_or(0)
}

pub fn no(obj: &ProposalTallyResult) -> i64 {
    obj.no.unwrap_or(0)
}

pub fn no_with_veto(obj: &ProposalTallyResult) -> i64 {
    obj.no_with_veto.unwrap_or(0)
}

pub fn abstain(obj: &ProposalTallyResult) -> i64 {
    obj.abstain.unwrap_or(0)
}

/// The option holding the most votes.
///
/// Options are scanned yes, no, no-with-veto, abstain; a later option takes the lead only with
/// strictly more votes than the current leader. The result is null when nobody voted or when a
/// later option ties the leader.
pub fn outstanding_option(obj: &ProposalTallyResult) -> Option<ProposalVoteOption> {
    let candidates = [
        (obj.yes, ProposalVoteOption::Yes),
        (obj.no, ProposalVoteOption::No),
        (obj.no_with_veto, ProposalVoteOption::NoWithVeto),
        (obj.abstain, ProposalVoteOption::Abstain),
    ];

    let mut leader = None;
    let mut votes = 0;
    let mut tied = false;
    for (amount, option) in candidates {
        let Some(amount) = amount else { continue };
        if amount > votes {
            leader = Some(option);
            votes = amount;
            tied = false;
        } else if amount == votes && leader.is_some() {
            tied = true;
        }
    }

    if tied {
        None
    } else {
        leader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(yes: i64, no: i64, no_with_veto: i64, abstain: i64) -> ProposalTallyResult {
        ProposalTallyResult {
            proposal_id: 1,
            yes: Some(yes),
            no: Some(no),
            no_with_veto: Some(no_with_veto),
            abstain: Some(abstain),
        }
    }

    #[test]
    fn test_outstanding_option() {
        assert_eq!(outstanding_option(&tally(5, 5, 0, 0)), None);
        assert_eq!(outstanding_option(&tally(3, 5, 0, 0)), Some(ProposalVoteOption::No));
        assert_eq!(outstanding_option(&tally(0, 0, 0, 0)), None);
        assert_eq!(outstanding_option(&tally(1, 2, 3, 4)), Some(ProposalVoteOption::Abstain));
        assert_eq!(outstanding_option(&tally(9, 2, 3, 4)), Some(ProposalVoteOption::Yes));
        assert_eq!(outstanding_option(&tally(0, 1, 7, 0)), Some(ProposalVoteOption::NoWithVeto));
    }

    #[test]
    fn test_outstanding_option_tie_with_abstain() {
        assert_eq!(outstanding_option(&tally(0, 4, 0, 4)), None);
        // A tie below the leader does not matter.
        assert_eq!(outstanding_option(&tally(6, 2, 2, 0)), Some(ProposalVoteOption::Yes));
        // A later option can break an earlier tie.
        assert_eq!(outstanding_option(&tally(3, 3, 5, 0)), Some(ProposalVoteOption::NoWithVeto));
    }

    #[test]
    fn test_missing_amounts() {
        let only_no = ProposalTallyResult { proposal_id: 1, no: Some(2), ..Default::default() };
        assert_eq!(outstanding_option(&only_no), Some(ProposalVoteOption::No));
        assert_eq!(yes(&only_no), 0);
        assert_eq!(no(&only_no), 2);
        assert_eq!(no_with_veto(&only_no), 0);
        assert_eq!(abstain(&only_no), 0);
        assert_eq!(outstanding_option(&ProposalTallyResult::default()), None);
    }
}
