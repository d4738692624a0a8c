//! Core governance engine: membership, proposals and voting under one set of rules.
//!
//! Every mutating operation reads the caller and block height from a
//! [`ChainContext`], validates against the current state, and then applies
//! all of its effects or none of them.

use crate::config::{ConfigError, GovernanceConfig};
use crate::error::GovernanceError;
use crate::membership::MembershipLedger;
use crate::proposal::{Proposal, ProposalDraft, ProposalStore};
use crate::tally::{self, ProposalStatus};
use crate::votes::{Vote, VoteLedger};
use stakedao_host::{ChainContext, LedgerAdapter};
use stakedao_types::{ActorId, BlockHeight, GovernanceParams, ParamsError, ProposalId, StakeAmount};

/// The governance state machine.
///
/// Owns the membership, proposal and vote ledgers together with the
/// collateral adapter. Operations are applied one at a time.
pub struct GovernanceEngine<L: LedgerAdapter> {
    pub(crate) params: GovernanceParams,
    pub(crate) membership: MembershipLedger,
    pub(crate) proposals: ProposalStore,
    pub(crate) votes: VoteLedger,
    ledger: L,
}

impl<L: LedgerAdapter> GovernanceEngine<L> {
    /// Create an empty engine after validating `params`.
    pub fn new(params: GovernanceParams, ledger: L) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            membership: MembershipLedger::new(),
            proposals: ProposalStore::new(),
            votes: VoteLedger::new(),
            ledger,
        })
    }

    /// Create an empty engine from a loaded configuration.
    pub fn from_config(config: &GovernanceConfig, ledger: L) -> Result<Self, ConfigError> {
        Ok(Self::new(config.params.clone(), ledger)?)
    }

    pub(crate) fn from_parts(
        params: GovernanceParams,
        membership: MembershipLedger,
        proposals: ProposalStore,
        votes: VoteLedger,
        ledger: L,
    ) -> Self {
        Self {
            params,
            membership,
            proposals,
            votes,
            ledger,
        }
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// The collateral adapter.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    // ── Mutating operations ────────────────────────────────────────────

    /// Lock `amount` of the caller's collateral as stake.
    ///
    /// Returns the caller's total stake after the deposit.
    pub fn join_dao(
        &mut self,
        ctx: &dyn ChainContext,
        amount: StakeAmount,
    ) -> Result<StakeAmount, GovernanceError> {
        let caller = ctx.current_caller();
        let result = self
            .membership
            .join(&mut self.ledger, &self.params, &caller, amount);
        match &result {
            Ok(stake) => tracing::info!(actor = %caller, amount, stake, "member joined"),
            Err(e) => tracing::debug!(actor = %caller, amount, error = %e, "join rejected"),
        }
        result
    }

    /// Release the caller's entire stake and end their membership.
    ///
    /// Votes already cast keep the weight they were cast with.
    pub fn leave_dao(&mut self, ctx: &dyn ChainContext) -> Result<StakeAmount, GovernanceError> {
        let caller = ctx.current_caller();
        let result = self
            .membership
            .leave(&mut self.ledger, &self.params.escrow, &caller);
        match &result {
            Ok(released) => tracing::info!(actor = %caller, released, "member left"),
            Err(e) => tracing::debug!(actor = %caller, error = %e, "leave rejected"),
        }
        result
    }

    /// Create a proposal whose voting window starts at the current height.
    pub fn create_proposal(
        &mut self,
        ctx: &dyn ChainContext,
        draft: &ProposalDraft,
    ) -> Result<ProposalId, GovernanceError> {
        let caller = ctx.current_caller();
        let now = ctx.current_height();
        let stake = self.membership.stake_of(&caller);
        let result = self
            .proposals
            .create(&caller, stake, draft, now, &self.params);
        match &result {
            Ok(id) => {
                self.votes.open(*id);
                if let Some(proposal) = self.proposals.get(*id) {
                    tracing::info!(
                        actor = %caller,
                        proposal = id,
                        kind = proposal.kind.name(),
                        param = ?proposal.kind.param(),
                        start = now.get(),
                        end = proposal.end.get(),
                        "proposal created"
                    );
                }
            }
            Err(e) => tracing::debug!(actor = %caller, error = %e, "proposal rejected"),
        }
        result
    }

    /// Cast the caller's vote on `id`, weighted by their current stake.
    ///
    /// Returns the weight recorded.
    pub fn cast_vote(
        &mut self,
        ctx: &dyn ChainContext,
        id: ProposalId,
        in_favor: bool,
    ) -> Result<StakeAmount, GovernanceError> {
        let caller = ctx.current_caller();
        let now = ctx.current_height();
        let result = self.try_cast_vote(&caller, id, in_favor, now);
        match &result {
            Ok(weight) => tracing::info!(
                actor = %caller,
                proposal = id,
                in_favor,
                weight,
                "vote cast"
            ),
            Err(e) => tracing::debug!(actor = %caller, proposal = id, error = %e, "vote rejected"),
        }
        result
    }

    fn try_cast_vote(
        &mut self,
        voter: &ActorId,
        id: ProposalId,
        in_favor: bool,
        now: BlockHeight,
    ) -> Result<StakeAmount, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        let weight = self.membership.stake_of(voter);
        if weight < self.params.min_stake {
            return Err(GovernanceError::InsufficientStake {
                have: weight,
                need: self.params.min_stake,
            });
        }
        if !proposal.is_open_at(now) {
            return Err(GovernanceError::ProposalEnded {
                id,
                end: proposal.end,
                now,
            });
        }
        self.votes.record(proposal, voter, in_favor, weight)?;
        Ok(weight)
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn get_proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub fn get_vote(&self, id: ProposalId, voter: &ActorId) -> Option<&Vote> {
        self.votes.get(id, voter)
    }

    pub fn get_member_stake(&self, actor: &ActorId) -> StakeAmount {
        self.membership.stake_of(actor)
    }

    pub fn get_total_votes(&self, id: ProposalId) -> StakeAmount {
        self.votes.total_votes(id)
    }

    pub fn get_proposal_count(&self) -> u64 {
        self.proposals.count()
    }

    pub fn is_member(&self, actor: &ActorId) -> bool {
        self.membership.is_member(actor)
    }

    pub fn total_staked(&self) -> StakeAmount {
        self.membership.total_staked()
    }

    pub fn member_count(&self) -> usize {
        self.membership.member_count()
    }

    /// Votes recorded on `id`, in voter order.
    pub fn votes_for_proposal(&self, id: ProposalId) -> impl Iterator<Item = (&ActorId, &Vote)> {
        self.votes.votes_for_proposal(id)
    }

    /// Whether `id` has drawn enough weight to meet quorum against current total stake.
    pub fn has_quorum(&self, id: ProposalId) -> bool {
        self.proposals.get(id).is_some()
            && tally::has_quorum(
                self.votes.total_votes(id),
                self.membership.total_staked(),
                self.params.quorum_threshold,
            )
    }

    pub fn has_passed(&self, id: ProposalId) -> bool {
        self.proposals.get(id).is_some_and(|proposal| {
            tally::has_passed(
                proposal,
                self.votes.total_votes(id),
                self.membership.total_staked(),
                self.params.quorum_threshold,
            )
        })
    }

    /// Outcome of `id` at the context's current height.
    pub fn proposal_status(
        &self,
        ctx: &dyn ChainContext,
        id: ProposalId,
    ) -> Option<ProposalStatus> {
        let proposal = self.proposals.get(id)?;
        Some(tally::status(
            proposal,
            self.votes.total_votes(id),
            self.membership.total_staked(),
            self.params.quorum_threshold,
            ctx.current_height(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stakedao_nullables::{NullContext, NullLedger};

    fn engine() -> GovernanceEngine<NullLedger> {
        let ledger = NullLedger::with_balances([("ST1TEST", 10_000), ("ST2TEST", 5_000)]);
        GovernanceEngine::new(GovernanceParams::default(), ledger).unwrap()
    }

    fn draft() -> ProposalDraft {
        ProposalDraft::new("Test Proposal", "Description", 1000, "content-approval")
    }

    #[test]
    fn invalid_params_rejected() {
        let params = GovernanceParams {
            quorum_threshold: 150,
            ..Default::default()
        };
        assert!(GovernanceEngine::new(params, NullLedger::new()).is_err());
    }

    #[test]
    fn from_config_validates() {
        let config = GovernanceConfig::from_toml_str("[params]\nmin_stake = 0").unwrap();
        let err = GovernanceEngine::from_config(&config, NullLedger::new())
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::Params(ParamsError::ZeroMinStake)));
    }

    #[test]
    fn vote_checks_run_in_order() {
        let ctx = NullContext::new(0, "ST1TEST");
        let mut engine = engine();

        // Unknown proposal beats missing stake.
        assert_eq!(
            engine.cast_vote(&ctx, 1, true),
            Err(GovernanceError::ProposalNotFound(1))
        );

        engine.join_dao(&ctx, 1000).unwrap();
        engine.create_proposal(&ctx, &draft()).unwrap();

        // Missing stake beats an ended window.
        ctx.set_caller("ST2TEST");
        ctx.set_height(5000);
        assert_eq!(
            engine.cast_vote(&ctx, 1, true),
            Err(GovernanceError::InsufficientStake { have: 0, need: 1000 })
        );

        // An ended window beats a duplicate vote.
        ctx.set_caller("ST1TEST");
        ctx.set_height(10);
        engine.cast_vote(&ctx, 1, true).unwrap();
        ctx.set_height(5000);
        assert!(matches!(
            engine.cast_vote(&ctx, 1, true),
            Err(GovernanceError::ProposalEnded { id: 1, .. })
        ));
    }

    #[test]
    fn weight_is_fixed_at_vote_time() {
        let ctx = NullContext::new(0, "ST1TEST");
        let mut engine = engine();
        engine.join_dao(&ctx, 1000).unwrap();
        engine.create_proposal(&ctx, &draft()).unwrap();
        engine.cast_vote(&ctx, 1, true).unwrap();

        engine.join_dao(&ctx, 4000).unwrap();
        assert_eq!(engine.get_proposal(1).unwrap().votes_for, 1000);

        engine.leave_dao(&ctx).unwrap();
        assert_eq!(engine.get_total_votes(1), 1000);
        assert_eq!(engine.get_vote(1, &ActorId::new("ST1TEST")).unwrap().weight, 1000);
    }

    #[test]
    fn outcome_queries_unknown_proposal() {
        let ctx = NullContext::new(0, "ST1TEST");
        let engine = engine();
        assert!(!engine.has_quorum(9));
        assert!(!engine.has_passed(9));
        assert_eq!(engine.proposal_status(&ctx, 9), None);
    }
}
