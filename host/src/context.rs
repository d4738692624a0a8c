//! Block height and caller identity for the operation being executed.

use stakedao_types::{ActorId, BlockHeight};

/// Per-call environment supplied by the host.
///
/// Both values are fixed for the duration of one operation.
pub trait ChainContext {
    /// The current block height.
    fn current_height(&self) -> BlockHeight;

    /// The principal invoking the operation.
    fn current_caller(&self) -> ActorId;
}
