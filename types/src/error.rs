//! Governance parameter validation errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("quorum threshold {0}% exceeds 100%")]
    InvalidThreshold(u32),

    #[error("minimum stake must be non-zero")]
    ZeroMinStake,

    #[error("maximum proposal count must be non-zero")]
    ZeroMaxProposals,

    #[error("invalid actor id for {field}: {value:?}")]
    InvalidActor { field: &'static str, value: String },

    #[error("escrow account must differ from the treasury")]
    EscrowIsTreasury,
}

impl ParamsError {
    /// Numeric error code reported to callers.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidThreshold(_) => 118,
            Self::ZeroMinStake | Self::ZeroMaxProposals => 117,
            Self::InvalidActor { .. } | Self::EscrowIsTreasury => 120,
        }
    }
}
