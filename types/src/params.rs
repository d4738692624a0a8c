//! Global governance parameters, fixed when the engine is constructed.

use crate::address::ActorId;
use crate::error::ParamsError;
use crate::StakeAmount;
use serde::{Deserialize, Serialize};

/// Process-wide configuration read by every governance operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Minimum stake to join, and the stake a member must hold to propose or vote.
    #[serde(default = "default_min_stake")]
    pub min_stake: StakeAmount,

    /// Maximum number of proposals that may ever be created.
    #[serde(default = "default_max_proposals")]
    pub max_proposals: u64,

    /// Quorum threshold as a percentage of total staked collateral.
    #[serde(default = "default_quorum_threshold")]
    pub quorum_threshold: u32,

    /// Treasury principal. Reserved for proposal execution.
    #[serde(default = "default_treasury")]
    pub treasury: ActorId,

    /// Custody account holding locked stake between join and leave.
    #[serde(default = "default_escrow")]
    pub escrow: ActorId,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_min_stake() -> StakeAmount {
    1000
}

fn default_max_proposals() -> u64 {
    1000
}

fn default_quorum_threshold() -> u32 {
    50
}

fn default_treasury() -> ActorId {
    ActorId::new("dao-treasury")
}

fn default_escrow() -> ActorId {
    ActorId::new("dao-escrow")
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceParams {
    /// Check internal consistency. Called before an engine is built from config.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.quorum_threshold > 100 {
            return Err(ParamsError::InvalidThreshold(self.quorum_threshold));
        }
        if self.min_stake == 0 {
            return Err(ParamsError::ZeroMinStake);
        }
        if self.max_proposals == 0 {
            return Err(ParamsError::ZeroMaxProposals);
        }
        for (field, actor) in [("treasury", &self.treasury), ("escrow", &self.escrow)] {
            if !actor.is_valid() {
                return Err(ParamsError::InvalidActor {
                    field,
                    value: actor.to_string(),
                });
            }
        }
        if self.escrow == self.treasury {
            return Err(ParamsError::EscrowIsTreasury);
        }
        Ok(())
    }
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            min_stake: default_min_stake(),
            max_proposals: default_max_proposals(),
            quorum_threshold: default_quorum_threshold(),
            treasury: default_treasury(),
            escrow: default_escrow(),
        }
    }
}
