//! Phase inputs supplied by the scenario layer.
//!
//! A scenario carries decisions that were already made by the agents: wolf
//! chat, night actions, discussion lines and votes. The referee validates and
//! resolves them; it never chooses on an agent's behalf.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use werewolf_core::{Alignment, NightCapability, Phase, PlayerId};

/// One phase of a scenario, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "phase_type", rename_all = "lowercase")]
pub enum PhaseSpec {
    Night(NightPhaseSpec),
    Day(DayPhaseSpec),
}

impl PhaseSpec {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Night(n) => Phase::Night(n.night_number),
            Self::Day(d) => Phase::Day(d.day_number),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatLine {
    pub speaker: PlayerId,
    pub content: String,
}

/// What a player does at night.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NightAction {
    Kill { target: PlayerId },
    Inspect { target: PlayerId },
    Protect { target: PlayerId },
    Sleep,
}

impl NightAction {
    /// The capability a role needs to submit this action.
    pub fn capability(&self) -> NightCapability {
        match self {
            Self::Kill { .. } => NightCapability::Kill,
            Self::Inspect { .. } => NightCapability::Inspect,
            Self::Protect { .. } => NightCapability::Protect,
            Self::Sleep => NightCapability::Sleep,
        }
    }

    pub fn target(&self) -> Option<&PlayerId> {
        match self {
            Self::Kill { target } | Self::Inspect { target } | Self::Protect { target } => {
                Some(target)
            }
            Self::Sleep => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NightSubmission {
    pub player_id: PlayerId,
    pub action: NightAction,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NightPhaseSpec {
    pub night_number: u32,
    #[serde(default)]
    pub wolf_chat: Vec<ChatLine>,
    #[serde(default)]
    pub actions: Vec<NightSubmission>,
    /// Free-form private reasoning per player, copied onto their prompt.
    #[serde(default)]
    pub private_thoughts: BTreeMap<PlayerId, serde_json::Value>,
    #[serde(default)]
    pub public_update: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscussionLine {
    pub player_id: PlayerId,
    pub speech: String,
    #[serde(default)]
    pub private_thought: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteSubmission {
    pub voter: PlayerId,
    pub target: PlayerId,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayPhaseSpec {
    pub day_number: u32,
    #[serde(default)]
    pub discussion: Vec<DiscussionLine>,
    /// Votes in cast order.
    #[serde(default)]
    pub votes: Vec<VoteSubmission>,
    #[serde(default)]
    pub private_thoughts: BTreeMap<PlayerId, serde_json::Value>,
    #[serde(default)]
    pub public_summary: String,
    #[serde(default)]
    pub end_of_day_summary: Option<String>,
}

/// The scenario's claim about how the match ended.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalResultSpec {
    #[serde(default)]
    pub winning_side: Option<Alignment>,
    #[serde(default)]
    pub reason: String,
}
