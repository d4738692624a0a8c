//! Collateral ledger adapter.

use crate::HostError;
use stakedao_types::{ActorId, StakeAmount};

/// External custody of collateral balances.
///
/// The governance core only asks for balances and requests transfers; it
/// never keeps balances of its own.
pub trait LedgerAdapter {
    /// Spendable balance of `actor`. Unknown actors have zero balance.
    fn balance_of(&self, actor: &ActorId) -> StakeAmount;

    /// Move `amount` from `from` to `to`.
    ///
    /// Must either apply fully or leave both balances untouched.
    fn transfer(
        &mut self,
        from: &ActorId,
        to: &ActorId,
        amount: StakeAmount,
    ) -> Result<(), HostError>;
}
