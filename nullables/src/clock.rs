//! Nullable block context: deterministic height and caller for testing.

use stakedao_host::ChainContext;
use stakedao_types::{ActorId, BlockHeight};
use std::cell::{Cell, RefCell};

/// A deterministic block context.
///
/// Height only advances when you tell it to, and the caller stays fixed
/// until switched.
pub struct NullContext {
    height: Cell<u64>,
    caller: RefCell<ActorId>,
}

impl NullContext {
    pub fn new(initial_height: u64, caller: impl Into<ActorId>) -> Self {
        Self {
            height: Cell::new(initial_height),
            caller: RefCell::new(caller.into()),
        }
    }

    /// Advance the height by a number of blocks.
    pub fn advance(&self, blocks: u64) {
        self.height.set(self.height.get() + blocks);
    }

    /// Set the height to a specific value.
    pub fn set_height(&self, height: u64) {
        self.height.set(height);
    }

    /// Switch the calling principal.
    pub fn set_caller(&self, caller: impl Into<ActorId>) {
        *self.caller.borrow_mut() = caller.into();
    }
}

impl ChainContext for NullContext {
    fn current_height(&self) -> BlockHeight {
        BlockHeight::new(self.height.get())
    }

    fn current_caller(&self) -> ActorId {
        self.caller.borrow().clone()
    }
}
