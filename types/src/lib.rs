//! Fundamental types for the stake-weighted DAO.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! actor identities, block heights, proposal ids and the global governance parameters.

pub mod address;
pub mod error;
pub mod params;
pub mod time;

pub use address::ActorId;
pub use error::ParamsError;
pub use params::GovernanceParams;
pub use time::BlockHeight;

/// Sequential proposal identifier. The first proposal is `1`; `0` is never assigned.
pub type ProposalId = u64;

/// Raw stake units. All stake and vote-weight arithmetic is integer.
pub type StakeAmount = u64;
