//! Seams between the governance core and its execution environment.
//!
//! The core never moves collateral or reads a clock itself. Every such effect
//! goes through one of the traits here, so the environment can be a chain
//! runtime, a service, or the in-memory nullables used in tests.

pub mod context;
pub mod error;
pub mod ledger;

pub use context::ChainContext;
pub use error::HostError;
pub use ledger::LedgerAdapter;
