//! Game record assembly.
//!
//! [`build_record`] runs a whole scenario through the orchestrator and freezes
//! the result, together with the roster and configuration, into a sealed
//! [`GameRecord`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use werewolf_core::{
    Alignment, Elimination, GameConfig, GameId, Phase, PlayerCard, PlayerId, Result, Role,
    WerewolfError,
};

use crate::hash::compute_record_hash;
use crate::orchestrator::run_phases;
use crate::phase::PhaseRecord;
use crate::scenario::{FinalResultSpec, PhaseSpec};
use crate::state::GameState;

/// The frozen aggregate of one match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub schema_version: String,
    pub game_id: GameId,
    pub created_at: DateTime<Utc>,
    pub seed: u64,
    pub config: GameConfig,
    /// Roster in join order.
    pub players: Vec<PlayerCard>,
    pub role_assignment: BTreeMap<PlayerId, Role>,
    pub phase_sequence: Vec<Phase>,
    pub phases: Vec<PhaseRecord>,
    pub final_result: FinalResult,
    /// BLAKE3 hash over every other field. `None` until sealed.
    pub content_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalResult {
    pub winning_side: Alignment,
    pub reason: String,
    pub survivors: Vec<Survivor>,
    pub elimination_order: Vec<Elimination>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Survivor {
    pub player_id: PlayerId,
    pub role: Role,
    pub alignment: Alignment,
}

impl GameRecord {
    pub fn role_of(&self, pid: &PlayerId) -> Option<Role> {
        self.role_assignment.get(pid).copied()
    }

    pub fn alignment_of(&self, pid: &PlayerId) -> Option<Alignment> {
        self.role_of(pid).map(Role::alignment)
    }

    pub fn card(&self, pid: &PlayerId) -> Option<&PlayerCard> {
        self.players.iter().find(|c| &c.id == pid)
    }

    /// Roster ids in join order.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|c| c.id.clone()).collect()
    }

    /// Compute and store the content hash.
    pub fn seal(&mut self) -> Result<()> {
        self.content_hash = Some(compute_record_hash(self)?);
        Ok(())
    }

    /// Whether the stored hash matches the record's content. Unsealed
    /// records never verify.
    pub fn verify_integrity(&self) -> Result<bool> {
        match &self.content_hash {
            Some(stored) => Ok(*stored == compute_record_hash(self)?),
            None => Ok(false),
        }
    }
}

/// Referee a full match and assemble its sealed record.
pub fn build_record(
    roster: Vec<PlayerCard>,
    role_assignment: BTreeMap<PlayerId, Role>,
    alignment_map: BTreeMap<PlayerId, Alignment>,
    phase_specs: &[PhaseSpec],
    final_result: &FinalResultSpec,
    seed: u64,
    config: GameConfig,
) -> Result<GameRecord> {
    let ids: Vec<PlayerId> = roster.iter().map(|c| c.id.clone()).collect();
    let game_id = GameId::derive(seed, &ids);
    tracing::info!(%game_id, players = ids.len(), phases = phase_specs.len(), "Refereeing match");

    let mut state = GameState::new(ids, role_assignment.clone(), alignment_map, config.clone())?;
    let phases = run_phases(&mut state, phase_specs)?;

    let winning_side = match (final_result.winning_side, state.winner()) {
        (Some(declared), Some(actual)) if declared != actual => {
            return Err(WerewolfError::InvalidState(format!(
                "declared winner {declared} contradicts the final state ({actual} won)"
            )));
        }
        (Some(declared), _) => declared,
        (None, Some(actual)) => actual,
        (None, None) => {
            return Err(WerewolfError::InvalidState(
                "the match is unfinished and no winner was declared".to_string(),
            ));
        }
    };

    let survivors = state
        .living_players()
        .into_iter()
        .filter_map(|pid| {
            let role = state.role_of(&pid)?;
            Some(Survivor {
                player_id: pid,
                role,
                alignment: role.alignment(),
            })
        })
        .collect();

    let mut record = GameRecord {
        schema_version: config.schema_version.clone(),
        game_id,
        created_at: Utc::now(),
        seed,
        config,
        players: roster,
        role_assignment,
        phase_sequence: phases.iter().map(PhaseRecord::phase).collect(),
        phases,
        final_result: FinalResult {
            winning_side,
            reason: final_result.reason.clone(),
            survivors,
            elimination_order: state.graveyard().to_vec(),
        },
        content_hash: None,
    };
    record.seal()?;

    tracing::info!(
        %game_id,
        winner = %winning_side,
        phases = record.phases.len(),
        "Match recorded"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{DayPhaseSpec, NightAction, NightPhaseSpec, NightSubmission, VoteSubmission};

    fn pid(id: &str) -> PlayerId {
        PlayerId::from(id)
    }

    fn roster() -> (Vec<PlayerCard>, BTreeMap<PlayerId, Role>, BTreeMap<PlayerId, Alignment>) {
        let roles = [
            ("A1", Role::Peasant),
            ("A2", Role::Werewolf),
            ("A3", Role::Detective),
        ];
        let cards = roles.iter().map(|(id, _)| PlayerCard::new(*id)).collect();
        let role_map: BTreeMap<PlayerId, Role> = roles.iter().map(|(id, r)| (pid(id), *r)).collect();
        let alignments = role_map.iter().map(|(p, r)| (p.clone(), r.alignment())).collect();
        (cards, role_map, alignments)
    }

    fn town_wins_on_day_one() -> Vec<PhaseSpec> {
        vec![
            PhaseSpec::Night(NightPhaseSpec {
                night_number: 1,
                actions: vec![NightSubmission {
                    player_id: pid("A2"),
                    action: NightAction::Kill { target: pid("A1") },
                    reason: None,
                }],
                ..NightPhaseSpec::default()
            }),
            PhaseSpec::Day(DayPhaseSpec {
                day_number: 1,
                votes: vec![VoteSubmission {
                    voter: pid("A3"),
                    target: pid("A2"),
                    reason: "inspected".to_string(),
                }],
                ..DayPhaseSpec::default()
            }),
        ]
    }

    #[test]
    fn record_is_sealed_and_verifiable() {
        let (cards, roles, alignments) = roster();
        let mut record = build_record(
            cards,
            roles,
            alignments,
            &town_wins_on_day_one(),
            &FinalResultSpec::default(),
            42,
            GameConfig::default(),
        )
        .unwrap();

        assert_eq!(record.final_result.winning_side, Alignment::Town);
        assert_eq!(record.phase_sequence, vec![Phase::Night(1), Phase::Day(1)]);
        assert_eq!(record.final_result.survivors.len(), 1);
        assert_eq!(record.final_result.elimination_order.len(), 2);
        assert!(record.verify_integrity().unwrap());

        record.final_result.reason = "tampered".to_string();
        assert!(!record.verify_integrity().unwrap());
    }

    #[test]
    fn contradicting_winner_is_rejected() {
        let (cards, roles, alignments) = roster();
        let err = build_record(
            cards,
            roles,
            alignments,
            &town_wins_on_day_one(),
            &FinalResultSpec {
                winning_side: Some(Alignment::Wolves),
                reason: String::new(),
            },
            42,
            GameConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WerewolfError::InvalidState(_)));
    }

    #[test]
    fn unfinished_match_needs_declared_winner() {
        let (cards, roles, alignments) = roster();
        let specs = &town_wins_on_day_one()[..1];
        let err = build_record(
            cards.clone(),
            roles.clone(),
            alignments.clone(),
            specs,
            &FinalResultSpec::default(),
            1,
            GameConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WerewolfError::InvalidState(_)));

        let record = build_record(
            cards,
            roles,
            alignments,
            specs,
            &FinalResultSpec {
                winning_side: Some(Alignment::Wolves),
                reason: "time limit".to_string(),
            },
            1,
            GameConfig::default(),
        )
        .unwrap();
        assert_eq!(record.final_result.winning_side, Alignment::Wolves);
    }

    #[test]
    fn unsealed_record_does_not_verify() {
        let (cards, roles, alignments) = roster();
        let mut record = build_record(
            cards,
            roles,
            alignments,
            &town_wins_on_day_one(),
            &FinalResultSpec::default(),
            7,
            GameConfig::default(),
        )
        .unwrap();
        record.content_hash = None;
        assert!(!record.verify_integrity().unwrap());
    }
}
