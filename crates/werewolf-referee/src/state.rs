//! Mutable ledger of a single match.
//!
//! `GameState` owns the roster, the role and alignment maps, the graveyard,
//! the public history and the private journals. Journals are append-only and
//! only exposed as slices.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use werewolf_core::{
    Alignment, Elimination, EliminationCause, GameConfig, HistoryEvent, NightEvent, Phase,
    PhaseKind, PlayerId, Result, Role, WerewolfError,
};

/// A day vote, as journaled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteEntry {
    pub voter: PlayerId,
    pub target: PlayerId,
    pub day: u32,
    pub reason: String,
}

/// A detective inspection, as journaled. Never made public.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InspectionEntry {
    pub detective: PlayerId,
    pub target: PlayerId,
    pub night: u32,
    pub is_wolf: bool,
}

/// A doctor protection, as journaled. Never made public.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtectionEntry {
    pub doctor: PlayerId,
    pub target: PlayerId,
    pub night: u32,
    pub saved: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    /// Join order.
    players: Vec<PlayerId>,
    roles: BTreeMap<PlayerId, Role>,
    alignments: BTreeMap<PlayerId, Alignment>,
    alive: BTreeMap<PlayerId, bool>,
    day_number: u32,
    night_number: u32,
    completed_phases: Vec<Phase>,
    public_history: Vec<HistoryEvent>,
    graveyard: Vec<Elimination>,
    elimination_order: Vec<PlayerId>,
    votes: Vec<VoteEntry>,
    inspections: Vec<InspectionEntry>,
    protections: Vec<ProtectionEntry>,
}

impl GameState {
    /// Set up a match. Every player needs exactly one role, and the
    /// alignment map must agree with the roles.
    pub fn new(
        players: Vec<PlayerId>,
        roles: BTreeMap<PlayerId, Role>,
        alignments: BTreeMap<PlayerId, Alignment>,
        config: GameConfig,
    ) -> Result<Self> {
        if players.is_empty() {
            return Err(WerewolfError::InvalidState(
                "a match needs at least one player".to_string(),
            ));
        }

        let roster: BTreeSet<&PlayerId> = players.iter().collect();
        if roster.len() != players.len() {
            return Err(WerewolfError::InvalidState(
                "roster contains duplicate player ids".to_string(),
            ));
        }
        if !roles.keys().eq(roster.iter().copied()) {
            return Err(WerewolfError::InvalidState(
                "role assignment must cover exactly the roster".to_string(),
            ));
        }
        if !alignments.keys().eq(roster.iter().copied()) {
            return Err(WerewolfError::InvalidState(
                "alignment map must cover exactly the roster".to_string(),
            ));
        }
        for (pid, role) in &roles {
            if alignments.get(pid) != Some(&role.alignment()) {
                return Err(WerewolfError::InvalidState(format!(
                    "player {pid} holds role {role} but is not aligned with {}",
                    role.alignment()
                )));
            }
        }

        if !config.roles.is_empty() {
            let mut declared = config.roles.clone();
            declared.sort();
            let mut assigned: Vec<Role> = roles.values().copied().collect();
            assigned.sort();
            if declared != assigned {
                return Err(WerewolfError::InvalidState(
                    "role assignment does not match the configured role bag".to_string(),
                ));
            }
        }

        let alive = players.iter().map(|pid| (pid.clone(), true)).collect();
        tracing::debug!(players = players.len(), "Game state initialised");

        Ok(Self {
            day_number: config.first_day,
            night_number: config.first_night,
            config,
            players,
            roles,
            alignments,
            alive,
            completed_phases: Vec::new(),
            public_history: Vec::new(),
            graveyard: Vec::new(),
            elimination_order: Vec::new(),
            votes: Vec::new(),
            inspections: Vec::new(),
            protections: Vec::new(),
        })
    }

    // ── Roster queries ────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// All players in join order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn contains(&self, pid: &PlayerId) -> bool {
        self.roles.contains_key(pid)
    }

    pub fn is_alive(&self, pid: &PlayerId) -> bool {
        self.alive.get(pid).copied().unwrap_or(false)
    }

    /// Living players in join order.
    pub fn living_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|pid| self.is_alive(pid))
            .cloned()
            .collect()
    }

    pub fn role_of(&self, pid: &PlayerId) -> Option<Role> {
        self.roles.get(pid).copied()
    }

    pub fn alignment_of(&self, pid: &PlayerId) -> Option<Alignment> {
        self.alignments.get(pid).copied()
    }

    pub fn roles(&self) -> &BTreeMap<PlayerId, Role> {
        &self.roles
    }

    /// Living wolves in join order.
    pub fn living_wolves(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|pid| self.is_alive(pid) && self.role_of(pid).is_some_and(Role::is_wolf))
            .cloned()
            .collect()
    }

    pub fn living_count(&self, alignment: Alignment) -> usize {
        self.players
            .iter()
            .filter(|pid| self.is_alive(pid) && self.alignment_of(pid) == Some(alignment))
            .count()
    }

    // ── Counters ──────────────────────────────────────────────────

    pub fn day_number(&self) -> u32 {
        self.day_number
    }

    pub fn night_number(&self) -> u32 {
        self.night_number
    }

    /// Phases completed so far, in order.
    pub fn completed_phases(&self) -> &[Phase] {
        &self.completed_phases
    }

    pub fn last_phase(&self) -> Option<Phase> {
        self.completed_phases.last().copied()
    }

    /// Mark a phase as complete and advance the matching counter by one.
    pub(crate) fn complete_phase(&mut self, phase: Phase) {
        match phase {
            Phase::Night(_) => self.night_number += 1,
            Phase::Day(_) => self.day_number += 1,
        }
        self.completed_phases.push(phase);
        tracing::debug!(%phase, "Phase completed");
    }

    // ── Read-only journals ────────────────────────────────────────

    pub fn public_history(&self) -> &[HistoryEvent] {
        &self.public_history
    }

    pub fn graveyard(&self) -> &[Elimination] {
        &self.graveyard
    }

    pub fn elimination_order(&self) -> &[PlayerId] {
        &self.elimination_order
    }

    pub fn last_elimination(&self) -> Option<&Elimination> {
        self.graveyard.last()
    }

    pub fn votes(&self) -> &[VoteEntry] {
        &self.votes
    }

    pub fn votes_cast_by<'a>(&'a self, pid: &'a PlayerId) -> impl Iterator<Item = &'a VoteEntry> {
        self.votes.iter().filter(move |v| &v.voter == pid)
    }

    pub fn votes_received_by<'a>(
        &'a self,
        pid: &'a PlayerId,
    ) -> impl Iterator<Item = &'a VoteEntry> {
        self.votes.iter().filter(move |v| &v.target == pid)
    }

    pub fn inspections(&self) -> &[InspectionEntry] {
        &self.inspections
    }

    pub fn protections(&self) -> &[ProtectionEntry] {
        &self.protections
    }

    // ── Mutations ─────────────────────────────────────────────────

    /// Remove a player from the game and announce it.
    pub fn eliminate(
        &mut self,
        pid: &PlayerId,
        cause: EliminationCause,
        phase: PhaseKind,
        number: u32,
    ) -> Result<&Elimination> {
        let (role, alignment) = self.identity(pid)?;
        if !self.is_alive(pid) {
            return Err(WerewolfError::InvalidState(format!(
                "player {pid} is already eliminated"
            )));
        }

        self.alive.insert(pid.clone(), false);
        let elimination = Elimination {
            player_id: pid.clone(),
            cause,
            phase,
            number,
            role,
            alignment,
        };
        self.public_history
            .push(elimination.public_event(self.config.reveal_role_on_elimination));
        self.elimination_order.push(pid.clone());
        self.graveyard.push(elimination);

        tracing::info!(player_id = %pid, %role, ?cause, %phase, number, "Player eliminated");

        Ok(&self.graveyard[self.graveyard.len() - 1])
    }

    pub fn record_vote(
        &mut self,
        voter: &PlayerId,
        target: &PlayerId,
        day: u32,
        reason: &str,
    ) -> Result<()> {
        self.require_known(voter)?;
        self.require_known(target)?;
        tracing::debug!(voter = %voter, target = %target, day, "Vote recorded");
        self.votes.push(VoteEntry {
            voter: voter.clone(),
            target: target.clone(),
            day,
            reason: reason.to_string(),
        });
        Ok(())
    }

    pub fn record_inspection(
        &mut self,
        detective: &PlayerId,
        target: &PlayerId,
        night: u32,
        is_wolf: bool,
    ) -> Result<()> {
        self.require_known(detective)?;
        self.require_known(target)?;
        self.inspections.push(InspectionEntry {
            detective: detective.clone(),
            target: target.clone(),
            night,
            is_wolf,
        });
        Ok(())
    }

    pub fn record_protection(
        &mut self,
        doctor: &PlayerId,
        target: &PlayerId,
        night: u32,
        saved: bool,
    ) -> Result<()> {
        self.require_known(doctor)?;
        self.require_known(target)?;
        self.protections.push(ProtectionEntry {
            doctor: doctor.clone(),
            target: target.clone(),
            night,
            saved,
        });
        Ok(())
    }

    /// Announce the outcome of a night.
    pub fn record_night_event(&mut self, night: u32, event: NightEvent) -> Result<()> {
        if let Some(pid) = event.player() {
            self.require_known(pid)?;
        }
        self.public_history.push(event.into_history(night));
        Ok(())
    }

    /// Announce a day that ended without an elimination.
    pub fn record_no_elimination(&mut self, day: u32, tally: BTreeMap<PlayerId, u32>) -> Result<()> {
        for pid in tally.keys() {
            self.require_known(pid)?;
        }
        self.public_history
            .push(HistoryEvent::NoElimination { day, tally });
        Ok(())
    }

    // ── Game over ─────────────────────────────────────────────────

    /// True once one alignment has no living members (or, with
    /// `wolf_parity_wins`, once wolves match the living town).
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Alignment> {
        let wolves = self.living_count(Alignment::Wolves);
        let town = self.living_count(Alignment::Town);
        if wolves == 0 {
            Some(Alignment::Town)
        } else if town == 0 || (self.config.wolf_parity_wins && wolves >= town) {
            Some(Alignment::Wolves)
        } else {
            None
        }
    }

    fn identity(&self, pid: &PlayerId) -> Result<(Role, Alignment)> {
        match (self.role_of(pid), self.alignment_of(pid)) {
            (Some(role), Some(alignment)) => Ok((role, alignment)),
            _ => Err(WerewolfError::InvalidState(format!("unknown player {pid}"))),
        }
    }

    fn require_known(&self, pid: &PlayerId) -> Result<()> {
        self.identity(pid).map(|_| ())
    }
}
