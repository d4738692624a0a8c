//! Membership ledger: who holds stake and how much.
//!
//! Stake is deposited into the escrow account on join and released in full
//! on leave. An actor is a member exactly while their recorded stake is
//! non-zero; zero-stake entries are never stored.

use crate::error::GovernanceError;
use stakedao_host::{HostError, LedgerAdapter};
use stakedao_types::{ActorId, GovernanceParams, StakeAmount};
use std::collections::BTreeMap;

/// Stake per member plus the running total across all members.
#[derive(Clone, Debug, Default)]
pub struct MembershipLedger {
    stakes: BTreeMap<ActorId, StakeAmount>,
    /// Always equal to the sum of `stakes`.
    total_staked: StakeAmount,
}

impl MembershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stake map, recomputing the running total.
    pub(crate) fn from_stakes(
        stakes: BTreeMap<ActorId, StakeAmount>,
    ) -> Result<Self, GovernanceError> {
        let mut total_staked: StakeAmount = 0;
        for (actor, stake) in &stakes {
            if *stake == 0 {
                return Err(GovernanceError::Snapshot(format!(
                    "zero stake recorded for {actor}"
                )));
            }
            total_staked = total_staked
                .checked_add(*stake)
                .ok_or(GovernanceError::Overflow)?;
        }
        Ok(Self {
            stakes,
            total_staked,
        })
    }

    /// Lock `amount` of `actor`'s collateral in the escrow account and add it
    /// to their stake.
    ///
    /// Returns the actor's stake after the deposit. The adapter is called at
    /// most once, and only after every check has passed. The escrow and
    /// treasury accounts can never hold stake: the escrow balance is other
    /// members' collateral.
    pub fn join(
        &mut self,
        ledger: &mut dyn LedgerAdapter,
        params: &GovernanceParams,
        actor: &ActorId,
        amount: StakeAmount,
    ) -> Result<StakeAmount, GovernanceError> {
        if *actor == params.escrow || *actor == params.treasury {
            return Err(GovernanceError::ReservedAccount(actor.clone()));
        }
        if amount == 0 || amount < params.min_stake {
            return Err(GovernanceError::InsufficientStakeAmount {
                amount,
                min: params.min_stake,
            });
        }
        let available = ledger.balance_of(actor);
        if available < amount {
            return Err(GovernanceError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let stake = self
            .stake_of(actor)
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;

        ledger
            .transfer(actor, &params.escrow, amount)
            .map_err(|e| match e {
                HostError::InsufficientFunds {
                    needed, available, ..
                } => GovernanceError::InsufficientBalance { needed, available },
                other => GovernanceError::Custody(other),
            })?;

        self.stakes.insert(actor.clone(), stake);
        self.total_staked = total_staked;
        Ok(stake)
    }

    /// Release `actor`'s entire stake from `escrow` and drop their membership.
    ///
    /// Returns the amount released.
    pub fn leave(
        &mut self,
        ledger: &mut dyn LedgerAdapter,
        escrow: &ActorId,
        actor: &ActorId,
    ) -> Result<StakeAmount, GovernanceError> {
        let stake = self.stake_of(actor);
        if stake == 0 {
            return Err(GovernanceError::NotAMember(actor.clone()));
        }
        let total_staked = self
            .total_staked
            .checked_sub(stake)
            .ok_or(GovernanceError::Overflow)?;

        ledger.transfer(escrow, actor, stake)?;

        self.stakes.remove(actor);
        self.total_staked = total_staked;
        Ok(stake)
    }

    /// Current stake of `actor` (zero for non-members).
    pub fn stake_of(&self, actor: &ActorId) -> StakeAmount {
        self.stakes.get(actor).copied().unwrap_or(0)
    }

    pub fn is_member(&self, actor: &ActorId) -> bool {
        self.stake_of(actor) > 0
    }

    /// Sum of all members' stake.
    pub fn total_staked(&self) -> StakeAmount {
        self.total_staked
    }

    pub fn member_count(&self) -> usize {
        self.stakes.len()
    }

    /// Iterate members and their stake in actor order.
    pub fn iter(&self) -> impl Iterator<Item = (&ActorId, StakeAmount)> {
        self.stakes.iter().map(|(actor, stake)| (actor, *stake))
    }
}
