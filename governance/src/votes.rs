//! Vote ledger: one stake-weighted vote per member per proposal.

use crate::error::GovernanceError;
use crate::proposal::Proposal;
use serde::{Deserialize, Serialize};
use stakedao_types::{ActorId, ProposalId, StakeAmount};
use std::collections::BTreeMap;

/// Composite key of a vote record.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoteKey {
    pub proposal: ProposalId,
    pub voter: ActorId,
}

impl VoteKey {
    pub fn new(proposal: ProposalId, voter: ActorId) -> Self {
        Self { proposal, voter }
    }
}

/// A cast vote. The weight is the voter's stake when the vote was cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub in_favor: bool,
    pub weight: StakeAmount,
}

/// Vote records plus the per-proposal total weight used for quorum.
#[derive(Clone, Debug, Default)]
pub struct VoteLedger {
    records: BTreeMap<VoteKey, Vote>,
    totals: BTreeMap<ProposalId, StakeAmount>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        records: BTreeMap<VoteKey, Vote>,
        totals: BTreeMap<ProposalId, StakeAmount>,
    ) -> Self {
        Self { records, totals }
    }

    /// Start a zero total for a freshly created proposal.
    pub fn open(&mut self, proposal: ProposalId) {
        self.totals.insert(proposal, 0);
    }

    pub fn get(&self, proposal: ProposalId, voter: &ActorId) -> Option<&Vote> {
        self.records.get(&VoteKey::new(proposal, voter.clone()))
    }

    /// Total weight cast on `proposal` (zero if unknown).
    pub fn total_votes(&self, proposal: ProposalId) -> StakeAmount {
        self.totals.get(&proposal).copied().unwrap_or(0)
    }

    /// Record `voter`'s vote and add `weight` to the proposal's tallies.
    ///
    /// All sums are computed before anything is written, so an overflow
    /// leaves the ledger and the proposal untouched.
    pub fn record(
        &mut self,
        proposal: &mut Proposal,
        voter: &ActorId,
        in_favor: bool,
        weight: StakeAmount,
    ) -> Result<(), GovernanceError> {
        let key = VoteKey::new(proposal.id, voter.clone());
        if self.records.contains_key(&key) {
            return Err(GovernanceError::AlreadyVoted {
                id: proposal.id,
                voter: voter.clone(),
            });
        }
        let total = self
            .total_votes(proposal.id)
            .checked_add(weight)
            .ok_or(GovernanceError::Overflow)?;
        let side = if in_favor {
            proposal.votes_for
        } else {
            proposal.votes_against
        };
        let side = side.checked_add(weight).ok_or(GovernanceError::Overflow)?;

        if in_favor {
            proposal.votes_for = side;
        } else {
            proposal.votes_against = side;
        }
        self.totals.insert(proposal.id, total);
        self.records.insert(key, Vote { in_favor, weight });
        Ok(())
    }

    /// Votes cast on `proposal`, in voter order.
    pub fn votes_for_proposal(
        &self,
        proposal: ProposalId,
    ) -> impl Iterator<Item = (&ActorId, &Vote)> {
        let from = VoteKey::new(proposal, ActorId::new(""));
        self.records
            .range(from..)
            .take_while(move |(key, _)| key.proposal == proposal)
            .map(|(key, vote)| (&key.voter, vote))
    }

    pub(crate) fn records(&self) -> &BTreeMap<VoteKey, Vote> {
        &self.records
    }

    pub(crate) fn totals(&self) -> &BTreeMap<ProposalId, StakeAmount> {
        &self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposalKind;
    use stakedao_types::BlockHeight;

    fn proposal(id: ProposalId) -> Proposal {
        Proposal {
            id,
            creator: ActorId::new("alice"),
            title: "t".into(),
            description: "d".into(),
            start: BlockHeight::new(0),
            end: BlockHeight::new(100),
            votes_for: 0,
            votes_against: 0,
            executed: false,
            kind: ProposalKind::ContentApproval,
        }
    }

    #[test]
    fn record_updates_both_tallies() {
        let mut ledger = VoteLedger::new();
        let mut p = proposal(1);
        ledger.open(1);

        ledger.record(&mut p, &ActorId::new("alice"), true, 1000).unwrap();
        ledger.record(&mut p, &ActorId::new("bob"), false, 400).unwrap();

        assert_eq!(p.votes_for, 1000);
        assert_eq!(p.votes_against, 400);
        assert_eq!(ledger.total_votes(1), 1400);
        assert_eq!(
            ledger.get(1, &ActorId::new("bob")),
            Some(&Vote {
                in_favor: false,
                weight: 400
            })
        );
    }

    #[test]
    fn second_vote_rejected_and_tallies_unchanged() {
        let mut ledger = VoteLedger::new();
        let mut p = proposal(1);
        ledger.open(1);
        let alice = ActorId::new("alice");
        ledger.record(&mut p, &alice, true, 1000).unwrap();

        let err = ledger.record(&mut p, &alice, false, 1000).unwrap_err();

        assert_eq!(err, GovernanceError::AlreadyVoted { id: 1, voter: alice });
        assert_eq!(p.votes_for, 1000);
        assert_eq!(p.votes_against, 0);
        assert_eq!(ledger.total_votes(1), 1000);
    }

    #[test]
    fn overflow_leaves_state_untouched() {
        let mut ledger = VoteLedger::new();
        let mut p = proposal(1);
        ledger.open(1);
        ledger
            .record(&mut p, &ActorId::new("alice"), true, StakeAmount::MAX)
            .unwrap();
        let err = ledger
            .record(&mut p, &ActorId::new("bob"), false, 1)
            .unwrap_err();
        assert_eq!(err, GovernanceError::Overflow);
        assert!(ledger.get(1, &ActorId::new("bob")).is_none());
        assert_eq!(p.votes_against, 0);
    }

    #[test]
    fn votes_for_proposal_is_scoped() {
        let mut ledger = VoteLedger::new();
        let (mut p1, mut p2) = (proposal(1), proposal(2));
        ledger.open(1);
        ledger.open(2);
        ledger.record(&mut p1, &ActorId::new("bob"), true, 10).unwrap();
        ledger.record(&mut p1, &ActorId::new("alice"), false, 20).unwrap();
        ledger.record(&mut p2, &ActorId::new("carol"), true, 30).unwrap();

        let voters: Vec<&str> = ledger
            .votes_for_proposal(1)
            .map(|(voter, _)| voter.as_str())
            .collect();
        assert_eq!(voters, ["alice", "bob"]);
        assert_eq!(ledger.votes_for_proposal(3).count(), 0);
    }

    #[test]
    fn unknown_proposal_totals_zero() {
        let ledger = VoteLedger::new();
        assert_eq!(ledger.total_votes(7), 0);
        assert!(ledger.get(7, &ActorId::new("alice")).is_none());
    }
}
