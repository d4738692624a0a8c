use stakedao_host::HostError;
use stakedao_types::{ActorId, BlockHeight, ProposalId, StakeAmount};
use thiserror::Error;

/// Every way a governance operation can be rejected.
///
/// A rejected operation leaves all governance state unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("stake amount {amount} is below the minimum of {min}")]
    InsufficientStakeAmount { amount: StakeAmount, min: StakeAmount },

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance {
        needed: StakeAmount,
        available: StakeAmount,
    },

    #[error("{0} is not a member")]
    NotAMember(ActorId),

    #[error("{0} is a reserved account and cannot hold stake")]
    ReservedAccount(ActorId),

    #[error("proposal limit of {0} reached")]
    MaxProposalsExceeded(u64),

    #[error("title must be 1..=100 characters, got {0}")]
    InvalidTitle(usize),

    #[error("description must be 1..=500 characters, got {0}")]
    InvalidDescription(usize),

    #[error("duration must be 100..=10000 blocks, got {0}")]
    InvalidDuration(u64),

    #[error("unknown proposal type {0:?}")]
    InvalidProposalType(String),

    #[error("insufficient stake: have {have}, need {need}")]
    InsufficientStake { have: StakeAmount, need: StakeAmount },

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("proposal {id} ended at {end}, current height {now}")]
    ProposalEnded {
        id: ProposalId,
        end: BlockHeight,
        now: BlockHeight,
    },

    #[error("{voter} has already voted on proposal {id}")]
    AlreadyVoted { id: ProposalId, voter: ActorId },

    #[error("custody transfer failed: {0}")]
    Custody(#[from] HostError),

    #[error("arithmetic overflow in stake accounting")]
    Overflow,

    #[error("invalid state snapshot: {0}")]
    Snapshot(String),
}

impl GovernanceError {
    /// Stable numeric code reported to callers across the host boundary.
    pub fn code(&self) -> u32 {
        match self {
            Self::ProposalNotFound(_) => 101,
            Self::AlreadyVoted { .. } => 102,
            Self::ProposalEnded { .. } => 103,
            Self::InsufficientStake { .. } => 104,
            Self::InvalidTitle(_) => 105,
            Self::InvalidDescription(_) => 106,
            Self::InvalidDuration(_) => 107,
            Self::InvalidProposalType(_) => 108,
            Self::InsufficientStakeAmount { .. } => 112,
            Self::NotAMember(_) => 113,
            Self::InsufficientBalance { .. } => 114,
            Self::Custody(_) => 115,
            Self::Overflow => 116,
            Self::MaxProposalsExceeded(_) => 119,
            Self::Snapshot(_) => 121,
            Self::ReservedAccount(_) => 122,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            GovernanceError::InsufficientStakeAmount { amount: 1, min: 2 },
            GovernanceError::InsufficientBalance {
                needed: 2,
                available: 1,
            },
            GovernanceError::NotAMember(ActorId::new("a")),
            GovernanceError::ReservedAccount(ActorId::new("a")),
            GovernanceError::MaxProposalsExceeded(1),
            GovernanceError::InvalidTitle(0),
            GovernanceError::InvalidDescription(0),
            GovernanceError::InvalidDuration(0),
            GovernanceError::InvalidProposalType("x".into()),
            GovernanceError::InsufficientStake { have: 0, need: 1 },
            GovernanceError::ProposalNotFound(1),
            GovernanceError::ProposalEnded {
                id: 1,
                end: BlockHeight::new(1),
                now: BlockHeight::new(2),
            },
            GovernanceError::AlreadyVoted {
                id: 1,
                voter: ActorId::new("a"),
            },
            GovernanceError::Custody(HostError::Rejected("x".into())),
            GovernanceError::Overflow,
            GovernanceError::Snapshot("x".into()),
        ];
        let mut codes: Vec<u32> = errors.iter().map(GovernanceError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn reference_codes() {
        assert_eq!(GovernanceError::InvalidTitle(0).code(), 105);
        assert_eq!(GovernanceError::MaxProposalsExceeded(10).code(), 119);
        assert_eq!(
            GovernanceError::AlreadyVoted {
                id: 1,
                voter: ActorId::new("a")
            }
            .code(),
            102
        );
    }
}
