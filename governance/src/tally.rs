//! Quorum and outcome evaluation. Pure functions of stored tallies.

use crate::proposal::Proposal;
use serde::{Deserialize, Serialize};
use stakedao_types::{BlockHeight, StakeAmount};

/// Where a proposal stands at a given height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// The voting window is still open.
    Active,
    /// Closed with quorum and more weight for than against.
    Passed,
    /// Closed with quorum but not enough weight in favour.
    Rejected,
    /// Closed without reaching quorum.
    NoQuorum,
}

/// `total_votes × 100 ≥ threshold × total_staked`, computed without overflow.
pub fn has_quorum(
    total_votes: StakeAmount,
    total_staked: StakeAmount,
    quorum_threshold: u32,
) -> bool {
    u128::from(total_votes) * 100 >= u128::from(quorum_threshold) * u128::from(total_staked)
}

/// Quorum reached and strictly more weight for than against.
pub fn has_passed(
    proposal: &Proposal,
    total_votes: StakeAmount,
    total_staked: StakeAmount,
    quorum_threshold: u32,
) -> bool {
    has_quorum(total_votes, total_staked, quorum_threshold)
        && proposal.votes_for > proposal.votes_against
}

pub fn status(
    proposal: &Proposal,
    total_votes: StakeAmount,
    total_staked: StakeAmount,
    quorum_threshold: u32,
    now: BlockHeight,
) -> ProposalStatus {
    if proposal.is_open_at(now) {
        ProposalStatus::Active
    } else if !has_quorum(total_votes, total_staked, quorum_threshold) {
        ProposalStatus::NoQuorum
    } else if proposal.votes_for > proposal.votes_against {
        ProposalStatus::Passed
    } else {
        ProposalStatus::Rejected
    }
}
