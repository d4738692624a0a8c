//! Nullable collateral ledger: in-memory balances with a transfer log.

use stakedao_host::{HostError, LedgerAdapter};
use stakedao_types::{ActorId, StakeAmount};
use std::collections::HashMap;

/// One applied transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: ActorId,
    pub to: ActorId,
    pub amount: StakeAmount,
}

/// An in-memory collateral ledger for testing.
#[derive(Default)]
pub struct NullLedger {
    balances: HashMap<ActorId, StakeAmount>,
    transfers: Vec<TransferRecord>,
    reject_next: Option<String>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger pre-funded with the given balances.
    pub fn with_balances<A: Into<ActorId>>(
        balances: impl IntoIterator<Item = (A, StakeAmount)>,
    ) -> Self {
        let mut ledger = Self::new();
        for (actor, amount) in balances {
            ledger.set_balance(actor, amount);
        }
        ledger
    }

    /// Overwrite an actor's balance.
    pub fn set_balance(&mut self, actor: impl Into<ActorId>, amount: StakeAmount) {
        self.balances.insert(actor.into(), amount);
    }

    /// Make the next transfer fail with [`HostError::Rejected`], whatever the balances.
    pub fn reject_next_transfer(&mut self, reason: impl Into<String>) {
        self.reject_next = Some(reason.into());
    }

    /// All transfers applied so far, in order.
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }

    /// Sum of every balance held in this ledger.
    pub fn total_supply(&self) -> StakeAmount {
        self.balances.values().sum()
    }
}

impl LedgerAdapter for NullLedger {
    fn balance_of(&self, actor: &ActorId) -> StakeAmount {
        self.balances.get(actor).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        from: &ActorId,
        to: &ActorId,
        amount: StakeAmount,
    ) -> Result<(), HostError> {
        if let Some(reason) = self.reject_next.take() {
            return Err(HostError::Rejected(reason));
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(HostError::InsufficientFunds {
                account: from.clone(),
                needed: amount,
                available,
            });
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| HostError::Backend(format!("balance overflow for {to}")))?;
        if from != to {
            self.balances.insert(from.clone(), available - amount);
            self.balances.insert(to.clone(), credited);
        }
        self.transfers.push(TransferRecord {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(name: &str) -> ActorId {
        ActorId::new(name)
    }

    #[test]
    fn transfer_moves_funds_and_logs() {
        let mut ledger = NullLedger::with_balances([("ST1TEST", 10_000)]);
        ledger
            .transfer(&actor("ST1TEST"), &actor("escrow"), 1000)
            .unwrap();
        assert_eq!(ledger.balance_of(&actor("ST1TEST")), 9000);
        assert_eq!(ledger.balance_of(&actor("escrow")), 1000);
        assert_eq!(ledger.transfers().len(), 1);
        assert_eq!(ledger.total_supply(), 10_000);
    }

    #[test]
    fn insufficient_funds_leaves_balances() {
        let mut ledger = NullLedger::with_balances([("ST1TEST", 10)]);
        let err = ledger
            .transfer(&actor("ST1TEST"), &actor("escrow"), 11)
            .unwrap_err();
        assert!(matches!(err, HostError::InsufficientFunds { needed: 11, available: 10, .. }));
        assert_eq!(ledger.balance_of(&actor("ST1TEST")), 10);
        assert!(ledger.transfers().is_empty());
    }

    #[test]
    fn rejection_is_one_shot() {
        let mut ledger = NullLedger::with_balances([("ST1TEST", 100)]);
        ledger.reject_next_transfer("paused");
        assert!(ledger.transfer(&actor("ST1TEST"), &actor("escrow"), 1).is_err());
        assert!(ledger.transfer(&actor("ST1TEST"), &actor("escrow"), 1).is_ok());
    }

    #[test]
    fn unknown_actor_has_zero_balance() {
        let ledger = NullLedger::new();
        assert_eq!(ledger.balance_of(&actor("nobody")), 0);
    }
}
