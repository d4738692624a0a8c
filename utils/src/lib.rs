//! Shared utilities for the stake-weighted DAO workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat};
pub use tracing_subscriber::util::TryInitError;
