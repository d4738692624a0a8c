//! Governance proposals and the store that assigns their ids.

use crate::error::GovernanceError;
use serde::{Deserialize, Serialize};
use stakedao_types::{ActorId, BlockHeight, GovernanceParams, ProposalId, StakeAmount};
use std::collections::BTreeMap;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
/// Voting window bounds, in blocks.
pub const MIN_DURATION: u64 = 100;
pub const MAX_DURATION: u64 = 10_000;

/// What a proposal asks the DAO to decide.
///
/// Parameterised kinds carry the optional numeric argument supplied at
/// creation; applying it is left to whoever executes passed proposals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalKind {
    /// Approve a piece of content for the platform.
    ContentApproval,
    /// Change the royalty rate.
    RoyaltyRate { param: Option<u64> },
    /// Ship a platform upgrade.
    PlatformUpgrade { param: Option<u64> },
    /// Change the quorum threshold.
    QuorumChange { param: Option<u64> },
}

impl ProposalKind {
    /// Parse a kind from its wire name.
    ///
    /// A parameter passed with `content-approval` is discarded.
    pub fn parse(name: &str, param: Option<u64>) -> Result<Self, GovernanceError> {
        match name {
            "content-approval" => Ok(Self::ContentApproval),
            "royalty-rate" => Ok(Self::RoyaltyRate { param }),
            "platform-upgrade" => Ok(Self::PlatformUpgrade { param }),
            "quorum-change" => Ok(Self::QuorumChange { param }),
            other => Err(GovernanceError::InvalidProposalType(other.to_string())),
        }
    }

    /// Wire name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContentApproval => "content-approval",
            Self::RoyaltyRate { .. } => "royalty-rate",
            Self::PlatformUpgrade { .. } => "platform-upgrade",
            Self::QuorumChange { .. } => "quorum-change",
        }
    }

    pub fn param(&self) -> Option<u64> {
        match self {
            Self::ContentApproval => None,
            Self::RoyaltyRate { param }
            | Self::PlatformUpgrade { param }
            | Self::QuorumChange { param } => *param,
        }
    }
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub creator: ActorId,
    pub title: String,
    pub description: String,
    /// Height at creation.
    pub start: BlockHeight,
    /// Last height at which votes are accepted.
    pub end: BlockHeight,
    pub votes_for: StakeAmount,
    pub votes_against: StakeAmount,
    /// Set by the external executor; never touched by this crate.
    pub executed: bool,
    pub kind: ProposalKind,
}

impl Proposal {
    /// Whether votes are still accepted at `now`. The end height itself is open.
    pub fn is_open_at(&self, now: BlockHeight) -> bool {
        now <= self.end
    }
}

/// Caller-supplied fields for a new proposal, validated by [`ProposalStore::create`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    /// Voting window length in blocks.
    pub duration: u64,
    /// Wire name of the proposal kind.
    pub proposal_type: String,
    pub param: Option<u64>,
}

impl ProposalDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        duration: u64,
        proposal_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            duration,
            proposal_type: proposal_type.into(),
            param: None,
        }
    }

    pub fn with_param(mut self, param: u64) -> Self {
        self.param = Some(param);
        self
    }
}

/// All proposals, keyed by id, plus the running id counter.
#[derive(Clone, Debug, Default)]
pub struct ProposalStore {
    proposals: BTreeMap<ProposalId, Proposal>,
    /// Number of proposals ever created; also the most recent id.
    count: u64,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        proposals: BTreeMap<ProposalId, Proposal>,
        count: u64,
    ) -> Result<Self, GovernanceError> {
        for (id, proposal) in &proposals {
            if *id != proposal.id || *id == 0 || *id > count {
                return Err(GovernanceError::Snapshot(format!(
                    "proposal keyed {id} has id {} with counter {count}",
                    proposal.id
                )));
            }
            if proposal.end <= proposal.start {
                return Err(GovernanceError::Snapshot(format!(
                    "proposal {id} ends at {} before it starts at {}",
                    proposal.end, proposal.start
                )));
            }
        }
        Ok(Self { proposals, count })
    }

    /// Validate `draft` and store it as the next proposal.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// proposal limit, title, description, duration, kind, creator stake.
    pub fn create(
        &mut self,
        creator: &ActorId,
        creator_stake: StakeAmount,
        draft: &ProposalDraft,
        now: BlockHeight,
        params: &GovernanceParams,
    ) -> Result<ProposalId, GovernanceError> {
        if self.count >= params.max_proposals {
            return Err(GovernanceError::MaxProposalsExceeded(params.max_proposals));
        }
        let title_len = draft.title.chars().count();
        if title_len == 0 || title_len > MAX_TITLE_LEN {
            return Err(GovernanceError::InvalidTitle(title_len));
        }
        let description_len = draft.description.chars().count();
        if description_len == 0 || description_len > MAX_DESCRIPTION_LEN {
            return Err(GovernanceError::InvalidDescription(description_len));
        }
        if !(MIN_DURATION..=MAX_DURATION).contains(&draft.duration) {
            return Err(GovernanceError::InvalidDuration(draft.duration));
        }
        let kind = ProposalKind::parse(&draft.proposal_type, draft.param)?;
        if creator_stake < params.min_stake {
            return Err(GovernanceError::InsufficientStake {
                have: creator_stake,
                need: params.min_stake,
            });
        }
        let end = now
            .checked_add(draft.duration)
            .ok_or(GovernanceError::Overflow)?;
        let id = self.count.checked_add(1).ok_or(GovernanceError::Overflow)?;

        self.proposals.insert(
            id,
            Proposal {
                id,
                creator: creator.clone(),
                title: draft.title.clone(),
                description: draft.description.clone(),
                start: now,
                end,
                votes_for: 0,
                votes_against: 0,
                executed: false,
                kind,
            },
        );
        self.count = id;
        Ok(id)
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ProposalId) -> Option<&mut Proposal> {
        self.proposals.get_mut(&id)
    }

    /// Number of proposals ever created.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Iterate proposals in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}
