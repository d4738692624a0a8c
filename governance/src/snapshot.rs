//! Serializable engine state for external persistence.

use crate::engine::GovernanceEngine;
use crate::error::GovernanceError;
use crate::membership::MembershipLedger;
use crate::proposal::{Proposal, ProposalStore};
use crate::votes::{Vote, VoteKey, VoteLedger};
use serde::{Deserialize, Serialize};
use stakedao_host::LedgerAdapter;
use stakedao_types::{ActorId, GovernanceParams, ProposalId, StakeAmount};
use std::collections::BTreeMap;

/// Everything the engine owns except the collateral adapter.
///
/// All maps are ordered, so identical state always encodes to identical bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceSnapshot {
    pub params: GovernanceParams,
    pub stakes: BTreeMap<ActorId, StakeAmount>,
    pub proposals: BTreeMap<ProposalId, Proposal>,
    pub proposal_count: u64,
    pub votes: BTreeMap<VoteKey, Vote>,
    pub total_votes: BTreeMap<ProposalId, StakeAmount>,
}

impl<L: LedgerAdapter> GovernanceEngine<L> {
    pub fn snapshot(&self) -> GovernanceSnapshot {
        GovernanceSnapshot {
            params: self.params.clone(),
            stakes: self
                .membership
                .iter()
                .map(|(actor, stake)| (actor.clone(), stake))
                .collect(),
            proposals: self
                .proposals
                .iter()
                .map(|proposal| (proposal.id, proposal.clone()))
                .collect(),
            proposal_count: self.proposals.count(),
            votes: self.votes.records().clone(),
            total_votes: self.votes.totals().clone(),
        }
    }

    /// Serialize the engine state with bincode.
    pub fn save_state(&self) -> Result<Vec<u8>, GovernanceError> {
        bincode::serialize(&self.snapshot()).map_err(|e| GovernanceError::Snapshot(e.to_string()))
    }

    /// Restore an engine from bytes produced by [`GovernanceEngine::save_state`].
    pub fn load_state(data: &[u8], ledger: L) -> Result<Self, GovernanceError> {
        let snapshot: GovernanceSnapshot =
            bincode::deserialize(data).map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        Self::restore(snapshot, ledger)
    }

    /// Rebuild an engine from a snapshot, checking the cross-ledger invariants.
    pub fn restore(snapshot: GovernanceSnapshot, ledger: L) -> Result<Self, GovernanceError> {
        snapshot
            .params
            .validate()
            .map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        check_tallies(&snapshot)?;

        let membership = MembershipLedger::from_stakes(snapshot.stakes)?;
        let proposals = ProposalStore::from_parts(snapshot.proposals, snapshot.proposal_count)?;
        let votes = VoteLedger::from_parts(snapshot.votes, snapshot.total_votes);
        Ok(Self::from_parts(
            snapshot.params,
            membership,
            proposals,
            votes,
            ledger,
        ))
    }
}

/// Every proposal's totals must equal the sum of its vote records, and
/// neither votes nor totals may refer to a proposal that does not exist.
fn check_tallies(snapshot: &GovernanceSnapshot) -> Result<(), GovernanceError> {
    if let Some(id) = snapshot
        .total_votes
        .keys()
        .find(|id| !snapshot.proposals.contains_key(*id))
    {
        return Err(GovernanceError::Snapshot(format!(
            "vote total recorded for unknown proposal {id}"
        )));
    }
    let mut sums: BTreeMap<ProposalId, (StakeAmount, StakeAmount)> = BTreeMap::new();
    for (key, vote) in &snapshot.votes {
        if !snapshot.proposals.contains_key(&key.proposal) {
            return Err(GovernanceError::Snapshot(format!(
                "vote by {} on unknown proposal {}",
                key.voter, key.proposal
            )));
        }
        let (for_sum, against_sum) = sums.entry(key.proposal).or_default();
        let side = if vote.in_favor { for_sum } else { against_sum };
        *side = side
            .checked_add(vote.weight)
            .ok_or(GovernanceError::Overflow)?;
    }

    for (id, proposal) in &snapshot.proposals {
        let (for_sum, against_sum) = sums.get(id).copied().unwrap_or_default();
        let total = snapshot.total_votes.get(id).copied().unwrap_or(0);
        if proposal.votes_for != for_sum
            || proposal.votes_against != against_sum
            || for_sum.checked_add(against_sum) != Some(total)
        {
            return Err(GovernanceError::Snapshot(format!(
                "tallies of proposal {id} do not match its vote records"
            )));
        }
    }
    Ok(())
}
