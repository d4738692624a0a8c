//! Stake-weighted DAO governance.
//!
//! Members lock collateral to gain voting weight, raise proposals with a
//! bounded voting window, and vote once per proposal with the stake they hold
//! at that moment. Outcomes are read from the accumulated weights against a
//! quorum threshold; executing a passed proposal is left to the host.
//!
//! Key principle: one member = one vote per proposal, weighted by stake.
//! The engine never touches balances or clocks directly; see `stakedao-host`.

pub mod config;
pub mod engine;
pub mod error;
pub mod membership;
pub mod proposal;
pub mod snapshot;
pub mod tally;
pub mod votes;

pub use config::{ConfigError, GovernanceConfig};
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use membership::MembershipLedger;
pub use proposal::{Proposal, ProposalDraft, ProposalKind, ProposalStore};
pub use snapshot::GovernanceSnapshot;
pub use tally::ProposalStatus;
pub use votes::{Vote, VoteKey, VoteLedger};
