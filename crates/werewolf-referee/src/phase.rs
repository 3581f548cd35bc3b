//! Immutable phase records: the audit trail of a match.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use werewolf_core::{Alignment, HistoryEvent, Phase, PlayerId, Role};

use crate::rules::{NightKill, WolfDecision};
use crate::scenario::{ChatLine, NightAction};

/// One completed phase, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "phase_type", rename_all = "lowercase")]
pub enum PhaseRecord {
    Night(NightPhaseRecord),
    Day(DayPhaseRecord),
}

impl PhaseRecord {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Night(n) => Phase::Night(n.night_number),
            Self::Day(d) => Phase::Day(d.day_number),
        }
    }

    pub fn public_state(&self) -> &PublicState {
        match self {
            Self::Night(n) => &n.public_state,
            Self::Day(d) => &d.public_state,
        }
    }

    pub fn as_day(&self) -> Option<&DayPhaseRecord> {
        match self {
            Self::Day(d) => Some(d),
            Self::Night(_) => None,
        }
    }

    pub fn as_night(&self) -> Option<&NightPhaseRecord> {
        match self {
            Self::Night(n) => Some(n),
            Self::Day(_) => None,
        }
    }
}

/// What every player can see once the phase has resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicState {
    pub alive_players: Vec<PlayerId>,
    pub public_history: Vec<HistoryEvent>,
}

// ── Day ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPhaseRecord {
    pub day_number: u32,
    pub public_state: PublicState,
    pub discussion: Vec<DiscussionTurn>,
    pub voting: DayVoting,
    pub end_of_day_summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscussionTurn {
    pub player_id: PlayerId,
    pub speech: String,
    pub max_words: usize,
    pub word_count: usize,
    pub over_limit: bool,
    pub private_thought: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayVoting {
    pub prompts: Vec<VotePrompt>,
    /// Accepted votes in cast order.
    pub responses: Vec<CastVote>,
    /// Votes from dead voters or for non-living targets.
    pub ignored: Vec<CastVote>,
    pub resolution: DayResolution,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VotePrompt {
    pub player_id: PlayerId,
    pub day_number: u32,
    pub options: Vec<PlayerId>,
    pub public_summary: String,
    pub private_thought: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastVote {
    pub voter: PlayerId,
    pub target: PlayerId,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayResolution {
    pub tally: BTreeMap<PlayerId, u32>,
    pub eliminated: Option<RevealedElimination>,
    pub runoff: Option<Vec<PlayerId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealedElimination {
    pub player_id: PlayerId,
    pub role: Role,
    pub alignment: Alignment,
    pub day_number: u32,
}

// ── Night ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NightPhaseRecord {
    pub night_number: u32,
    pub public_state: PublicState,
    pub wolf_chat: Vec<ChatLine>,
    pub prompts: Vec<NightPrompt>,
    pub responses: Vec<NightResponse>,
    pub resolution: NightResolution,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NightPrompt {
    pub player_id: PlayerId,
    pub night_number: u32,
    pub role: Role,
    pub options: NightOptions,
    pub private_thought: Option<serde_json::Value>,
}

/// The choices offered to a role at night.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "capability", rename_all = "lowercase")]
pub enum NightOptions {
    Kill { targets: Vec<PlayerId> },
    Inspect { targets: Vec<PlayerId> },
    Protect { targets: Vec<PlayerId> },
    Sleep,
}

impl NightOptions {
    pub fn targets(&self) -> &[PlayerId] {
        match self {
            Self::Kill { targets } | Self::Inspect { targets } | Self::Protect { targets } => {
                targets
            }
            Self::Sleep => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NightResponse {
    pub player_id: PlayerId,
    pub action: NightAction,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NightResolution {
    pub wolf_decision: Option<WolfDecision>,
    pub inspections: Vec<InspectionResult>,
    pub protections: Vec<ProtectionResult>,
    pub kill: Option<NightKill>,
    pub public_update: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InspectionResult {
    pub detective: PlayerId,
    pub target: PlayerId,
    pub is_wolf: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtectionResult {
    pub doctor: PlayerId,
    pub target: PlayerId,
    pub saved: bool,
}
