//! Core domain types for a werewolf match.
//!
//! Roles form a closed set; each role maps to exactly one alignment and one
//! night capability, so orchestration code never branches on role names.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Identity ──────────────────────────────────────────────────────

/// Namespace UUID for deterministic game IDs.
const WEREWOLF_NS: Uuid = Uuid::from_bytes([
    0x3f, 0x2c, 0x91, 0x5e, 0x7a, 0x04, 0x4b, 0x21, 0x9c, 0x6d, 0x58, 0xe1, 0x0b, 0x77, 0xa2, 0xd4,
]);

/// Identifier of a player (agent) in a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Derive a game ID from the seed and roster so that rebuilding the same
    /// match yields the same ID.
    pub fn derive(seed: u64, roster: &[PlayerId]) -> Self {
        let mut name = seed.to_string();
        for id in roster {
            name.push(':');
            name.push_str(id.as_str());
        }
        Self(Uuid::new_v5(&WEREWOLF_NS, name.as_bytes()))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Roles ─────────────────────────────────────────────────────────

/// One of the two opposing factions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Wolves,
    Town,
}

impl Alignment {
    /// The faction this one plays against.
    pub fn opposing(self) -> Self {
        match self {
            Self::Wolves => Self::Town,
            Self::Town => Self::Wolves,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wolves => f.write_str("wolves"),
            Self::Town => f.write_str("town"),
        }
    }
}

/// What a role may do at night.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NightCapability {
    Kill,
    Inspect,
    Protect,
    Sleep,
}

/// The closed set of roles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Werewolf,
    Detective,
    Doctor,
    Peasant,
    Villager,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Werewolf,
        Role::Detective,
        Role::Doctor,
        Role::Peasant,
        Role::Villager,
    ];

    pub fn alignment(self) -> Alignment {
        match self {
            Self::Werewolf => Alignment::Wolves,
            Self::Detective | Self::Doctor | Self::Peasant | Self::Villager => Alignment::Town,
        }
    }

    pub fn night_capability(self) -> NightCapability {
        match self {
            Self::Werewolf => NightCapability::Kill,
            Self::Detective => NightCapability::Inspect,
            Self::Doctor => NightCapability::Protect,
            Self::Peasant | Self::Villager => NightCapability::Sleep,
        }
    }

    pub fn is_wolf(self) -> bool {
        self == Self::Werewolf
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Werewolf => "werewolf",
            Self::Detective => "detective",
            Self::Doctor => "doctor",
            Self::Peasant => "peasant",
            Self::Villager => "villager",
        };
        f.write_str(name)
    }
}

// ── Player cards ──────────────────────────────────────────────────

/// Pre-game rating hints supplied by the rating subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingHints {
    pub overall: Option<i32>,
    pub wolf: Option<i32>,
    pub villager: Option<i32>,
}

/// Pre-game identity of an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerCard {
    pub id: PlayerId,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub rating: RatingHints,
}

impl PlayerCard {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            alias: None,
            provider: None,
            model: None,
            rating: RatingHints::default(),
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn with_overall_rating(mut self, rating: i32) -> Self {
        self.rating.overall = Some(rating);
        self
    }
}

// ── Phases ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Night,
    Day,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Night => f.write_str("night"),
            Self::Day => f.write_str("day"),
        }
    }
}

/// A position in the night/day cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Night(u32),
    Day(u32),
}

impl Phase {
    pub fn kind(self) -> PhaseKind {
        match self {
            Self::Night(_) => PhaseKind::Night,
            Self::Day(_) => PhaseKind::Day,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Self::Night(n) | Self::Day(n) => n,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.number())
    }
}

/// How a player left the game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EliminationCause {
    NightKill,
    Vote,
}
