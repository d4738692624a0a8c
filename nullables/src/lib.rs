//! Nullable host infrastructure for deterministic testing.
//!
//! The governance engine reaches its environment only through the
//! `stakedao-host` traits. This crate provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record every effect so tests can assert on it
//!
//! Usage: swap real host implementations for nullables in tests.

pub mod clock;
pub mod ledger;

pub use clock::NullContext;
pub use ledger::{NullLedger, TransferRecord};
