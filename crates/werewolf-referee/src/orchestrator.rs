//! Phase orchestrator: drives the night/day cycle against a [`GameState`].
//!
//! Each phase is validated in full before the state is touched, so a rejected
//! phase leaves the state exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use werewolf_core::{
    EliminationCause, NightCapability, NightEvent, Phase, PhaseKind, PlayerId, Result,
    WerewolfError,
};

use crate::phase::{
    CastVote, DayPhaseRecord, DayResolution, DayVoting, DiscussionTurn, InspectionResult,
    NightOptions, NightPhaseRecord, NightPrompt, NightResolution, NightResponse, PhaseRecord,
    ProtectionResult, PublicState, RevealedElimination, VotePrompt,
};
use crate::rules::{self, NightKill};
use crate::scenario::{DayPhaseSpec, NightAction, NightPhaseSpec, NightSubmission, PhaseSpec};
use crate::state::GameState;

/// Resolve one phase and return its record.
pub fn build_phase(state: &mut GameState, spec: &PhaseSpec) -> Result<PhaseRecord> {
    check_preconditions(state, spec.phase())?;
    match spec {
        PhaseSpec::Night(night) => build_night(state, night).map(PhaseRecord::Night),
        PhaseSpec::Day(day) => build_day(state, day).map(PhaseRecord::Day),
    }
}

/// Resolve phases in order, stopping as soon as the game is over. Phases
/// declared after that point are discarded.
pub fn run_phases(state: &mut GameState, specs: &[PhaseSpec]) -> Result<Vec<PhaseRecord>> {
    let mut records = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        if state.is_terminal() {
            tracing::warn!(
                discarded = specs.len() - i,
                next_phase = %spec.phase(),
                "Game over, discarding remaining phases"
            );
            break;
        }
        records.push(build_phase(state, spec)?);
    }
    Ok(records)
}

fn check_preconditions(state: &GameState, phase: Phase) -> Result<()> {
    if state.is_terminal() {
        return Err(WerewolfError::InvalidState(format!(
            "cannot resolve {phase}: the game is already over"
        )));
    }
    if let Some(last) = state.last_phase() {
        if last.kind() == phase.kind() {
            return Err(WerewolfError::InvalidState(format!(
                "{phase} cannot follow {last}: phases must alternate"
            )));
        }
    }
    let expected = match phase.kind() {
        PhaseKind::Night => state.night_number(),
        PhaseKind::Day => state.day_number(),
    };
    if phase.number() != expected {
        return Err(WerewolfError::InvalidState(format!(
            "expected {} {expected}, got {phase}",
            phase.kind()
        )));
    }
    Ok(())
}

fn public_state(state: &GameState) -> PublicState {
    PublicState {
        alive_players: state.living_players(),
        public_history: state.public_history().to_vec(),
    }
}

fn require_known(state: &GameState, pid: &PlayerId, what: &str) -> Result<()> {
    if state.contains(pid) {
        Ok(())
    } else {
        Err(WerewolfError::InvalidAction(format!("unknown {what} {pid}")))
    }
}

// ── Night ─────────────────────────────────────────────────────────

fn validate_night(state: &GameState, spec: &NightPhaseSpec) -> Result<()> {
    let config = state.config();

    if !spec.wolf_chat.is_empty() && !config.wolf_chat_at_night {
        return Err(WerewolfError::InvalidAction(
            "wolf chat is disabled for this game".to_string(),
        ));
    }
    for line in &spec.wolf_chat {
        require_known(state, &line.speaker, "chat speaker")?;
        let is_wolf = state.role_of(&line.speaker).is_some_and(|r| r.is_wolf());
        if !is_wolf || !state.is_alive(&line.speaker) {
            return Err(WerewolfError::InvalidAction(format!(
                "{} may not speak in the wolf chat",
                line.speaker
            )));
        }
    }

    let mut seen = BTreeSet::new();
    for submission in &spec.actions {
        let actor = &submission.player_id;
        require_known(state, actor, "actor")?;
        if !state.is_alive(actor) {
            return Err(WerewolfError::InvalidAction(format!(
                "{actor} is dead and cannot act"
            )));
        }
        if !seen.insert(actor) {
            return Err(WerewolfError::InvalidAction(format!(
                "{actor} submitted more than one night action"
            )));
        }

        let Some(role) = state.role_of(actor) else {
            continue;
        };
        let needed = submission.action.capability();
        if needed != NightCapability::Sleep && needed != role.night_capability() {
            return Err(WerewolfError::InvalidAction(format!(
                "{actor} ({role}) may not submit {needed:?}"
            )));
        }

        let Some(target) = submission.action.target() else {
            continue;
        };
        require_known(state, target, "target")?;
        if !state.is_alive(target) {
            return Err(WerewolfError::InvalidAction(format!(
                "{actor} targeted {target}, who is not alive"
            )));
        }
        match &submission.action {
            NightAction::Kill { .. } if state.role_of(target).is_some_and(|r| r.is_wolf()) => {
                return Err(WerewolfError::InvalidAction(format!(
                    "{actor} cannot kill fellow wolf {target}"
                )));
            }
            NightAction::Inspect { .. } if target == actor => {
                return Err(WerewolfError::InvalidAction(format!(
                    "{actor} cannot inspect themself"
                )));
            }
            NightAction::Protect { .. } if target == actor && !config.doctor_can_self_protect => {
                return Err(WerewolfError::InvalidAction(format!(
                    "{actor} cannot protect themself in this game"
                )));
            }
            _ => {}
        }
    }

    let wolves_alive = !state.living_wolves().is_empty();
    let has_kill = spec
        .actions
        .iter()
        .any(|s| matches!(s.action, NightAction::Kill { .. }));
    if wolves_alive && !has_kill {
        return Err(WerewolfError::InvalidState(format!(
            "night {} has living wolves but no kill submission",
            spec.night_number
        )));
    }
    Ok(())
}

fn night_options(state: &GameState, actor: &PlayerId, capability: NightCapability) -> NightOptions {
    let living = state.living_players();
    match capability {
        NightCapability::Kill => NightOptions::Kill {
            targets: living
                .into_iter()
                .filter(|p| !state.role_of(p).is_some_and(|r| r.is_wolf()))
                .collect(),
        },
        NightCapability::Inspect => NightOptions::Inspect {
            targets: living.into_iter().filter(|p| p != actor).collect(),
        },
        NightCapability::Protect => NightOptions::Protect {
            targets: living
                .into_iter()
                .filter(|p| p != actor || state.config().doctor_can_self_protect)
                .collect(),
        },
        NightCapability::Sleep => NightOptions::Sleep,
    }
}

fn build_night(state: &mut GameState, spec: &NightPhaseSpec) -> Result<NightPhaseRecord> {
    validate_night(state, spec)?;
    let night = spec.night_number;

    let by_actor: BTreeMap<&PlayerId, &NightSubmission> =
        spec.actions.iter().map(|s| (&s.player_id, s)).collect();

    let mut prompts = Vec::new();
    let mut responses = Vec::new();
    for pid in state.living_players() {
        let Some(role) = state.role_of(&pid) else {
            continue;
        };
        prompts.push(NightPrompt {
            player_id: pid.clone(),
            night_number: night,
            role,
            options: night_options(state, &pid, role.night_capability()),
            private_thought: spec.private_thoughts.get(&pid).cloned(),
        });
        let response = match by_actor.get(&pid) {
            Some(s) => NightResponse {
                player_id: pid.clone(),
                action: s.action.clone(),
                reason: s.reason.clone(),
            },
            None => NightResponse {
                player_id: pid.clone(),
                action: NightAction::Sleep,
                reason: None,
            },
        };
        responses.push(response);
    }

    let mut kills = Vec::new();
    let mut inspections = Vec::new();
    let mut guards: Vec<(&PlayerId, &PlayerId)> = Vec::new();
    for s in &spec.actions {
        match &s.action {
            NightAction::Kill { target } => {
                kills.push((s.player_id.clone(), target.clone(), s.reason.clone()));
            }
            NightAction::Inspect { target } => {
                inspections.push(InspectionResult {
                    detective: s.player_id.clone(),
                    target: target.clone(),
                    is_wolf: rules::inspect(state, target)?,
                });
            }
            NightAction::Protect { target } => guards.push((&s.player_id, target)),
            NightAction::Sleep => {}
        }
    }

    let wolf_decision = rules::wolf_team_decision(&kills);

    // The first doctor guarding the kill target gets the save.
    let kill: Option<NightKill> = match &wolf_decision {
        Some(decision) => {
            let guard = guards
                .iter()
                .find(|(_, target)| **target == decision.target);
            Some(rules::resolve_night_kill(
                state,
                &decision.target,
                guard.map(|(_, target)| *target),
                guard.map(|(doctor, _)| *doctor),
            )?)
        }
        None => None,
    };

    let protections: Vec<ProtectionResult> = guards
        .iter()
        .map(|(doctor, target)| ProtectionResult {
            doctor: (*doctor).clone(),
            target: (*target).clone(),
            saved: kill
                .as_ref()
                .is_some_and(|k| k.saved_by.as_ref() == Some(*doctor)),
        })
        .collect();

    // Validation is done; commit to the state.
    for i in &inspections {
        state.record_inspection(&i.detective, &i.target, night, i.is_wolf)?;
    }
    for p in &protections {
        state.record_protection(&p.doctor, &p.target, night, p.saved)?;
    }
    match &kill {
        // The elimination is the night's only public announcement.
        Some(k) if k.success => {
            state.eliminate(&k.target, EliminationCause::NightKill, PhaseKind::Night, night)?;
        }
        _ => {
            tracing::info!(night, "Nobody died in the night");
            state.record_night_event(night, NightEvent::NoKill)?;
        }
    }
    state.complete_phase(Phase::Night(night));

    Ok(NightPhaseRecord {
        night_number: night,
        public_state: public_state(state),
        wolf_chat: spec.wolf_chat.clone(),
        prompts,
        responses,
        resolution: NightResolution {
            wolf_decision,
            inspections,
            protections,
            kill,
            public_update: spec.public_update.clone(),
        },
    })
}

// ── Day ───────────────────────────────────────────────────────────

fn build_day(state: &mut GameState, spec: &DayPhaseSpec) -> Result<DayPhaseRecord> {
    let day = spec.day_number;
    let max_words = state.config().max_words_day_talk;

    let mut discussion = Vec::new();
    for line in &spec.discussion {
        require_known(state, &line.player_id, "speaker")?;
        if !state.is_alive(&line.player_id) {
            tracing::debug!(player_id = %line.player_id, day, "Skipping speech from dead player");
            continue;
        }
        let word_count = line.speech.split_whitespace().count();
        discussion.push(DiscussionTurn {
            player_id: line.player_id.clone(),
            speech: line.speech.clone(),
            max_words,
            word_count,
            over_limit: word_count > max_words,
            private_thought: line.private_thought.clone(),
        });
    }

    let mut voters = BTreeSet::new();
    let mut responses = Vec::new();
    let mut ignored = Vec::new();
    for v in &spec.votes {
        require_known(state, &v.voter, "voter")?;
        require_known(state, &v.target, "vote target")?;
        if !voters.insert(&v.voter) {
            return Err(WerewolfError::InvalidAction(format!(
                "{} voted more than once on day {day}",
                v.voter
            )));
        }
        let cast = CastVote {
            voter: v.voter.clone(),
            target: v.target.clone(),
            reason: v.reason.clone(),
        };
        if !state.is_alive(&v.voter) || !state.is_alive(&v.target) {
            tracing::warn!(voter = %v.voter, target = %v.target, day, "Ignoring vote");
            ignored.push(cast);
        } else {
            responses.push(cast);
        }
    }

    let living = state.living_players();
    let prompts: Vec<VotePrompt> = living
        .iter()
        .map(|pid| VotePrompt {
            player_id: pid.clone(),
            day_number: day,
            options: living.iter().filter(|p| *p != pid).cloned().collect(),
            public_summary: spec.public_summary.clone(),
            private_thought: spec.private_thoughts.get(pid).cloned(),
        })
        .collect();

    for v in &responses {
        state.record_vote(&v.voter, &v.target, day, &v.reason)?;
    }

    let ballot: BTreeMap<PlayerId, PlayerId> = responses
        .iter()
        .map(|v| (v.voter.clone(), v.target.clone()))
        .collect();
    let eligible: BTreeSet<PlayerId> = living.into_iter().collect();
    let outcome = rules::resolve_vote(&ballot, &eligible);

    let eliminated = match &outcome.eliminated {
        Some(target) => {
            let e = state.eliminate(target, EliminationCause::Vote, PhaseKind::Day, day)?;
            Some(RevealedElimination {
                player_id: e.player_id.clone(),
                role: e.role,
                alignment: e.alignment,
                day_number: day,
            })
        }
        None => {
            tracing::info!(day, runoff = ?outcome.runoff, "Day ended without an elimination");
            state.record_no_elimination(day, outcome.tally.clone())?;
            None
        }
    };
    state.complete_phase(Phase::Day(day));

    Ok(DayPhaseRecord {
        day_number: day,
        public_state: public_state(state),
        discussion,
        voting: DayVoting {
            prompts,
            responses,
            ignored,
            resolution: DayResolution {
                tally: outcome.tally,
                eliminated,
                runoff: outcome.runoff,
            },
        },
        end_of_day_summary: spec.end_of_day_summary.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{ChatLine, DiscussionLine, VoteSubmission};
    use crate::state::tests::{pid, six_player_state};
    use werewolf_core::{GameConfig, HistoryEvent, Role};

    fn act(player: &str, action: NightAction) -> NightSubmission {
        NightSubmission {
            player_id: pid(player),
            action,
            reason: None,
        }
    }

    fn kill(target: &str) -> NightAction {
        NightAction::Kill { target: pid(target) }
    }

    fn night(n: u32, actions: Vec<NightSubmission>) -> PhaseSpec {
        PhaseSpec::Night(NightPhaseSpec {
            night_number: n,
            actions,
            ..NightPhaseSpec::default()
        })
    }

    fn day(n: u32, votes: &[(&str, &str)]) -> PhaseSpec {
        PhaseSpec::Day(DayPhaseSpec {
            day_number: n,
            votes: votes
                .iter()
                .map(|(v, t)| VoteSubmission {
                    voter: pid(v),
                    target: pid(t),
                    reason: format!("{v} suspects {t}"),
                })
                .collect(),
            ..DayPhaseSpec::default()
        })
    }

    #[test]
    fn night_kill_eliminates_target() {
        let mut state = six_player_state(GameConfig::default());
        let record = build_phase(
            &mut state,
            &night(1, vec![act("A2", kill("A4")), act("A5", kill("A4"))]),
        )
        .unwrap();
        let night = record.as_night().unwrap();
        assert!(!state.is_alive(&pid("A4")));
        assert_eq!(state.night_number(), 2);
        assert!(night.resolution.kill.as_ref().unwrap().success);
        assert!(night.resolution.wolf_decision.as_ref().unwrap().unanimous);
        assert_eq!(night.prompts.len(), 6);
        assert_eq!(night.responses.len(), 6);
        assert!(!night.public_state.alive_players.contains(&pid("A4")));
        assert!(matches!(
            state.public_history(),
            [HistoryEvent::Elimination {
                cause: EliminationCause::NightKill,
                ..
            }]
        ));
    }

    #[test]
    fn unguarded_kill_ignores_other_protections() {
        let mut state = six_player_state(GameConfig::default());
        let record = build_phase(
            &mut state,
            &night(
                1,
                vec![
                    act("A2", kill("A4")),
                    act("A6", NightAction::Protect { target: pid("A3") }),
                ],
            ),
        )
        .unwrap();
        let night = record.as_night().unwrap();
        let k = night.resolution.kill.as_ref().unwrap();
        assert!(k.success);
        assert_eq!(k.saved_by, None);
        assert!(!night.resolution.protections[0].saved);
    }

    #[test]
    fn doctor_save_is_private() {
        let mut state = six_player_state(GameConfig::default());
        let record = build_phase(
            &mut state,
            &night(
                1,
                vec![
                    act("A2", kill("A3")),
                    act("A6", NightAction::Protect { target: pid("A3") }),
                    act("A3", NightAction::Inspect { target: pid("A5") }),
                ],
            ),
        )
        .unwrap();
        let night = record.as_night().unwrap();
        let k = night.resolution.kill.as_ref().unwrap();
        assert!(!k.success);
        assert_eq!(k.saved_by, Some(pid("A6")));
        assert!(night.resolution.protections[0].saved);
        assert!(night.resolution.inspections[0].is_wolf);
        assert!(state.is_alive(&pid("A3")));
        assert_eq!(
            state.public_history(),
            &[HistoryEvent::NoKill { night: 1 }]
        );
        assert_eq!(state.inspections().len(), 1);
        assert_eq!(state.protections().len(), 1);
    }

    #[test]
    fn capability_mismatch_is_rejected() {
        let mut state = six_player_state(GameConfig::default());
        let err = build_phase(
            &mut state,
            &night(1, vec![act("A2", kill("A4")), act("A1", kill("A3"))]),
        )
        .unwrap_err();
        assert!(matches!(err, WerewolfError::InvalidAction(_)));
        // Nothing was committed.
        assert_eq!(state.night_number(), 1);
        assert!(state.public_history().is_empty());
    }

    #[test]
    fn wolf_cannot_target_wolf() {
        let mut state = six_player_state(GameConfig::default());
        let err = build_phase(&mut state, &night(1, vec![act("A2", kill("A5"))])).unwrap_err();
        assert!(matches!(err, WerewolfError::InvalidAction(_)));
    }

    #[test]
    fn doctor_self_protection_follows_config() {
        let spec = night(
            1,
            vec![
                act("A2", kill("A1")),
                act("A6", NightAction::Protect { target: pid("A6") }),
            ],
        );
        let mut state = six_player_state(GameConfig::default());
        assert!(matches!(
            build_phase(&mut state, &spec),
            Err(WerewolfError::InvalidAction(_))
        ));

        let mut state = six_player_state(GameConfig {
            doctor_can_self_protect: true,
            ..GameConfig::default()
        });
        assert!(build_phase(&mut state, &spec).is_ok());
    }

    #[test]
    fn wolf_chat_speakers_must_be_living_wolves() {
        let mut state = six_player_state(GameConfig::default());
        let spec = PhaseSpec::Night(NightPhaseSpec {
            night_number: 1,
            wolf_chat: vec![ChatLine {
                speaker: pid("A1"),
                content: "hello".to_string(),
            }],
            actions: vec![act("A2", kill("A4"))],
            ..NightPhaseSpec::default()
        });
        assert!(matches!(
            build_phase(&mut state, &spec),
            Err(WerewolfError::InvalidAction(_))
        ));
    }

    #[test]
    fn night_without_kill_is_invalid_state() {
        let mut state = six_player_state(GameConfig::default());
        let err = build_phase(&mut state, &night(1, vec![])).unwrap_err();
        assert!(matches!(err, WerewolfError::InvalidState(_)));
    }

    #[test]
    fn phases_must_alternate_and_match_counters() {
        let mut state = six_player_state(GameConfig::default());
        assert!(matches!(
            build_phase(&mut state, &night(2, vec![act("A2", kill("A4"))])),
            Err(WerewolfError::InvalidState(_))
        ));
        build_phase(&mut state, &night(1, vec![act("A2", kill("A4"))])).unwrap();
        assert!(matches!(
            build_phase(&mut state, &night(2, vec![act("A2", kill("A1"))])),
            Err(WerewolfError::InvalidState(_))
        ));
    }

    #[test]
    fn day_vote_eliminates_and_reveals() {
        let mut state = six_player_state(GameConfig::default());
        build_phase(&mut state, &night(1, vec![act("A2", kill("A4"))])).unwrap();
        let record = build_phase(
            &mut state,
            &day(1, &[("A1", "A5"), ("A3", "A5"), ("A5", "A3"), ("A6", "A5"), ("A2", "A3")]),
        )
        .unwrap();
        let day = record.as_day().unwrap();
        let eliminated = day.voting.resolution.eliminated.as_ref().unwrap();
        assert_eq!(eliminated.player_id, pid("A5"));
        assert_eq!(eliminated.role, Role::Werewolf);
        assert_eq!(day.voting.prompts.len(), 5);
        assert_eq!(day.voting.prompts[0].options.len(), 4);
        assert_eq!(state.votes().len(), 5);
        assert_eq!(state.elimination_order(), &[pid("A4"), pid("A5")]);
    }

    #[test]
    fn votes_involving_the_dead_are_ignored() {
        let mut state = six_player_state(GameConfig::default());
        build_phase(&mut state, &night(1, vec![act("A2", kill("A4"))])).unwrap();
        let record = build_phase(
            &mut state,
            &day(1, &[("A4", "A2"), ("A1", "A4"), ("A6", "A2")]),
        )
        .unwrap();
        let day = record.as_day().unwrap();
        assert_eq!(day.voting.ignored.len(), 2);
        assert_eq!(day.voting.responses.len(), 1);
        assert_eq!(state.votes().len(), 1);
        assert_eq!(
            day.voting.resolution.eliminated.as_ref().map(|e| &e.player_id),
            Some(&pid("A2"))
        );
    }

    #[test]
    fn self_votes_are_counted() {
        let mut state = six_player_state(GameConfig::default());
        build_phase(&mut state, &night(1, vec![act("A2", kill("A4"))])).unwrap();
        let record = build_phase(&mut state, &day(1, &[("A1", "A1"), ("A3", "A1"), ("A5", "A3")]))
            .unwrap();
        let day = record.as_day().unwrap();
        assert!(day.voting.ignored.is_empty());
        assert_eq!(
            day.voting.resolution.tally,
            BTreeMap::from([(pid("A1"), 2), (pid("A3"), 1)])
        );
        assert_eq!(
            day.voting.resolution.eliminated.as_ref().map(|e| &e.player_id),
            Some(&pid("A1"))
        );
        assert_eq!(state.votes().len(), 3);
    }

    #[test]
    fn tie_records_no_elimination() {
        let mut state = six_player_state(GameConfig::default());
        build_phase(&mut state, &night(1, vec![act("A2", kill("A4"))])).unwrap();
        let record = build_phase(&mut state, &day(1, &[("A1", "A5"), ("A5", "A1")])).unwrap();
        let day = record.as_day().unwrap();
        assert!(day.voting.resolution.eliminated.is_none());
        assert_eq!(
            day.voting.resolution.runoff,
            Some(vec![pid("A1"), pid("A5")])
        );
        assert!(matches!(
            state.public_history().last(),
            Some(HistoryEvent::NoElimination { day: 1, .. })
        ));
    }

    #[test]
    fn duplicate_and_unknown_votes_are_invalid() {
        let mut state = six_player_state(GameConfig::default());
        build_phase(&mut state, &night(1, vec![act("A2", kill("A4"))])).unwrap();
        assert!(matches!(
            build_phase(&mut state, &day(1, &[("A1", "A5"), ("A1", "A2")])),
            Err(WerewolfError::InvalidAction(_))
        ));
        assert!(matches!(
            build_phase(&mut state, &day(1, &[("A1", "Q7")])),
            Err(WerewolfError::InvalidAction(_))
        ));
        assert!(state.votes().is_empty());
    }

    #[test]
    fn discussion_tracks_word_limit() {
        let mut state = six_player_state(GameConfig {
            max_words_day_talk: 3,
            ..GameConfig::default()
        });
        build_phase(&mut state, &night(1, vec![act("A2", kill("A4"))])).unwrap();
        let spec = PhaseSpec::Day(DayPhaseSpec {
            day_number: 1,
            discussion: vec![
                DiscussionLine {
                    player_id: pid("A1"),
                    speech: "I think A5 is lying to us".to_string(),
                    private_thought: None,
                },
                DiscussionLine {
                    player_id: pid("A4"),
                    speech: "boo".to_string(),
                    private_thought: None,
                },
            ],
            ..DayPhaseSpec::default()
        });
        let record = build_phase(&mut state, &spec).unwrap();
        let day = record.as_day().unwrap();
        assert_eq!(day.discussion.len(), 1);
        assert!(day.discussion[0].over_limit);
        assert_eq!(day.discussion[0].word_count, 7);
    }

    #[test]
    fn run_stops_at_terminal_state() {
        let mut state = six_player_state(GameConfig::default());
        let specs = vec![
            night(1, vec![act("A2", kill("A4"))]),
            day(1, &[("A1", "A5"), ("A3", "A5"), ("A6", "A5")]),
            night(2, vec![act("A2", kill("A1"))]),
            day(2, &[("A3", "A2"), ("A6", "A2")]),
            night(3, vec![act("A2", kill("A3"))]),
            day(3, &[]),
        ];
        let records = run_phases(&mut state, &specs).unwrap();
        assert_eq!(records.len(), 4);
        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(werewolf_core::Alignment::Town));
        assert!(matches!(
            build_phase(&mut state, &specs[4]),
            Err(WerewolfError::InvalidState(_))
        ));
    }
}
