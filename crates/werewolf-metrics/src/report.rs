//! Metrics report types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use werewolf_core::{Alignment, GameId, PlayerId, Role};

/// Derived, read-only view over one game record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsReport {
    pub game_id: GameId,
    pub per_agent: BTreeMap<PlayerId, AgentMetrics>,
    pub per_role: BTreeMap<Role, RoleSummary>,
    pub summary: MetricsSummary,
    pub decision_quality: DecisionQuality,
    pub influence: Influence,
    /// `None` when no day was played.
    pub early_signals: Option<EarlySignals>,
    pub centrality: BTreeMap<PlayerId, Centrality>,
}

// ── Per agent ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentMetrics {
    pub alias: Option<String>,
    pub role: Role,
    pub alignment: Alignment,
    pub won: bool,
    /// Day phases the agent was alive at the start of.
    pub days_survived: u32,
    pub votes_cast: Vec<VoteCast>,
    pub votes_received: Vec<VoteReceived>,
    /// Number of the phase in which the agent left the game: the day of the
    /// vote, or the night of the kill. `killed_on_night` tells them apart.
    pub eliminated_on_day: Option<u32>,
    /// Night the agent was killed, if they died to the wolves.
    pub killed_on_night: Option<u32>,
    /// Detectives only.
    pub inspections: Option<Vec<InspectionLog>>,
    /// Doctors only.
    pub protections: Option<Vec<ProtectionLog>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteCast {
    pub day: u32,
    pub target: PlayerId,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteReceived {
    pub day: u32,
    pub from: PlayerId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InspectionLog {
    pub night: u32,
    pub target: PlayerId,
    pub is_wolf: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtectionLog {
    pub night: u32,
    pub target: PlayerId,
    pub saved: bool,
}

// ── Per role / global ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleSummary {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    /// Mean overall pre-game rating of the players holding the role.
    pub average_initial_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSummary {
    pub town_win: bool,
    pub wolves_eliminated_days: Vec<u32>,
    pub mis_eliminations: Vec<MisElimination>,
    pub mis_elim_rate: f64,
    pub total_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MisElimination {
    pub day: u32,
    pub player_id: PlayerId,
    pub role: Role,
}

// ── Decision quality ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DecisionQuality {
    pub per_agent: BTreeMap<PlayerId, AgentDecisionQuality>,
    pub per_day: Vec<DayDecisionQuality>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentDecisionQuality {
    pub votes_on_enemies_rate: f64,
    pub wolves_voted: u32,
    pub town_voted: u32,
    /// Wolves only.
    pub bus_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayDecisionQuality {
    pub day_number: u32,
    pub town_precision: f64,
    pub town_recall: f64,
    pub mis_elimination: bool,
}

// ── Influence ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Influence {
    pub per_agent: BTreeMap<PlayerId, AgentInfluence>,
    pub swing_events: Vec<SwingEvent>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentInfluence {
    pub swing_votes: u32,
    pub early_final_wagon_votes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwingEvent {
    pub day_number: u32,
    pub swing_voter: PlayerId,
    pub target: PlayerId,
}

// ── Discussion ────────────────────────────────────────────────────

/// First-day indicators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EarlySignals {
    pub day_number: u32,
    pub wolf_eliminated: bool,
    pub precision: f64,
    pub recall: f64,
    pub town_mentions_of_wolves: u32,
    pub total_mentions: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Centrality {
    pub in_degree: u32,
    pub out_degree: u32,
}
