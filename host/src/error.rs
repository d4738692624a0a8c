use stakedao_types::{ActorId, StakeAmount};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("insufficient funds in {account}: need {needed}, available {available}")]
    InsufficientFunds {
        account: ActorId,
        needed: StakeAmount,
        available: StakeAmount,
    },

    #[error("transfer rejected by ledger: {0}")]
    Rejected(String),

    #[error("ledger backend error: {0}")]
    Backend(String),
}
