//! Resolution algorithms: day votes, night kills, inspections.
//!
//! Everything here is a pure computation over its arguments. Ordered maps
//! keep every result independent of submission hashing or iteration order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use werewolf_core::{PlayerId, Result, WerewolfError};

use crate::state::GameState;

/// Outcome of a day vote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteOutcome {
    pub tally: BTreeMap<PlayerId, u32>,
    pub eliminated: Option<PlayerId>,
    /// Targets tied for the maximum, sorted. `None` when a single target led.
    pub runoff: Option<Vec<PlayerId>>,
}

/// Tally `votes` (voter → target) and pick the strict plurality target.
///
/// Votes cast by voters outside `eligible` are ignored. A tie for the
/// maximum yields no elimination and the tied set as runoff candidates.
pub fn resolve_vote(
    votes: &BTreeMap<PlayerId, PlayerId>,
    eligible: &BTreeSet<PlayerId>,
) -> VoteOutcome {
    let mut tally: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for (voter, target) in votes {
        if !eligible.contains(voter) {
            tracing::debug!(voter = %voter, "Ignoring vote from ineligible voter");
            continue;
        }
        *tally.entry(target.clone()).or_insert(0) += 1;
    }

    let Some(max) = tally.values().copied().max() else {
        return VoteOutcome {
            tally,
            eliminated: None,
            runoff: None,
        };
    };

    let leaders: Vec<PlayerId> = tally
        .iter()
        .filter(|(_, &count)| count == max)
        .map(|(pid, _)| pid.clone())
        .collect();

    if leaders.len() == 1 {
        VoteOutcome {
            eliminated: leaders.into_iter().next(),
            tally,
            runoff: None,
        }
    } else {
        VoteOutcome {
            tally,
            eliminated: None,
            runoff: Some(leaders),
        }
    }
}

/// Outcome of the wolves' kill attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NightKill {
    pub target: PlayerId,
    pub success: bool,
    pub saved_by: Option<PlayerId>,
}

/// Arbitrate a kill against a protection. The kill fails only when a named
/// protector guarded the kill target.
pub fn resolve_kill(
    kill_target: &PlayerId,
    protect_target: Option<&PlayerId>,
    protector: Option<&PlayerId>,
) -> NightKill {
    match (protect_target, protector) {
        (Some(guarded), Some(doctor)) if guarded == kill_target => NightKill {
            target: kill_target.clone(),
            success: false,
            saved_by: Some(doctor.clone()),
        },
        _ => NightKill {
            target: kill_target.clone(),
            success: true,
            saved_by: None,
        },
    }
}

/// [`resolve_kill`] with the target checked against the current state: it
/// must be a living, non-wolf player.
pub fn resolve_night_kill(
    state: &GameState,
    kill_target: &PlayerId,
    protect_target: Option<&PlayerId>,
    protector: Option<&PlayerId>,
) -> Result<NightKill> {
    if !state.is_alive(kill_target) {
        return Err(WerewolfError::InvalidAction(format!(
            "kill target {kill_target} is not a living player"
        )));
    }
    if state.role_of(kill_target).is_some_and(|r| r.is_wolf()) {
        return Err(WerewolfError::InvalidAction(format!(
            "kill target {kill_target} is a wolf"
        )));
    }
    Ok(resolve_kill(kill_target, protect_target, protector))
}

/// Detective inspection: whether `target` holds the wolf role.
pub fn inspect(state: &GameState, target: &PlayerId) -> Result<bool> {
    state
        .role_of(target)
        .map(|r| r.is_wolf())
        .ok_or_else(|| WerewolfError::InvalidAction(format!("unknown inspection target {target}")))
}

/// The wolf team's collective kill choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WolfDecision {
    pub target: PlayerId,
    pub reason: Option<String>,
    pub unanimous: bool,
}

/// Combine individual wolf kill submissions `(wolf, target, reason)` in
/// submission order. Plurality wins; ties go to the target submitted first.
pub fn wolf_team_decision(
    submissions: &[(PlayerId, PlayerId, Option<String>)],
) -> Option<WolfDecision> {
    let mut counts: BTreeMap<&PlayerId, usize> = BTreeMap::new();
    for (_, target, _) in submissions {
        *counts.entry(target).or_insert(0) += 1;
    }

    // First submission wins ties; scan in submission order.
    let mut best: Option<(&PlayerId, usize)> = None;
    for (_, target, _) in submissions {
        let count = counts.get(target).copied().unwrap_or(0);
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((target, count));
        }
    }

    let (target, _) = best?;
    let reason = submissions
        .iter()
        .find(|(_, t, _)| t == target)
        .and_then(|(_, _, r)| r.clone());

    Some(WolfDecision {
        target: target.clone(),
        reason,
        unanimous: counts.len() == 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{pid, six_player_state};
    use werewolf_core::{EliminationCause, GameConfig, PhaseKind};

    fn votes(pairs: &[(&str, &str)]) -> BTreeMap<PlayerId, PlayerId> {
        pairs.iter().map(|(v, t)| (pid(v), pid(t))).collect()
    }

    fn eligible(ids: &[&str]) -> BTreeSet<PlayerId> {
        ids.iter().map(|id| pid(id)).collect()
    }

    #[test]
    fn plurality_vote_eliminates_leader() {
        let outcome = resolve_vote(
            &votes(&[("A", "B"), ("C", "B"), ("D", "E")]),
            &eligible(&["A", "C", "D"]),
        );
        assert_eq!(outcome.tally, BTreeMap::from([(pid("B"), 2), (pid("E"), 1)]));
        assert_eq!(outcome.eliminated, Some(pid("B")));
        assert_eq!(outcome.runoff, None);
    }

    #[test]
    fn tied_vote_produces_runoff() {
        let outcome = resolve_vote(&votes(&[("A", "B"), ("C", "D")]), &eligible(&["A", "C"]));
        assert_eq!(outcome.tally, BTreeMap::from([(pid("B"), 1), (pid("D"), 1)]));
        assert_eq!(outcome.eliminated, None);
        let runoff: BTreeSet<PlayerId> = outcome.runoff.unwrap().into_iter().collect();
        assert_eq!(runoff, eligible(&["B", "D"]));
    }

    #[test]
    fn ineligible_voters_are_ignored() {
        let outcome = resolve_vote(
            &votes(&[("A", "B"), ("C", "D"), ("X", "D")]),
            &eligible(&["A", "C"]),
        );
        assert_eq!(outcome.tally.get(&pid("D")), Some(&1));
        assert!(outcome.runoff.is_some());
    }

    #[test]
    fn empty_vote_has_no_outcome() {
        let outcome = resolve_vote(&BTreeMap::new(), &eligible(&["A"]));
        assert!(outcome.tally.is_empty());
        assert_eq!(outcome.eliminated, None);
        assert_eq!(outcome.runoff, None);
    }

    #[test]
    fn vote_resolution_is_deterministic() {
        let v = votes(&[("A", "B"), ("C", "D"), ("E", "F")]);
        let e = eligible(&["A", "C", "E"]);
        let first = serde_json::to_string(&resolve_vote(&v, &e)).unwrap();
        for _ in 0..10 {
            assert_eq!(serde_json::to_string(&resolve_vote(&v, &e)).unwrap(), first);
        }
    }

    #[test]
    fn protected_kill_fails() {
        let kill = resolve_kill(&pid("X"), Some(&pid("X")), Some(&pid("Doc")));
        assert!(!kill.success);
        assert_eq!(kill.saved_by, Some(pid("Doc")));
        assert_eq!(kill.target, pid("X"));
    }

    #[test]
    fn unprotected_kill_succeeds() {
        let kill = resolve_kill(&pid("X"), Some(&pid("Y")), Some(&pid("Doc")));
        assert!(kill.success);
        assert_eq!(kill.target, pid("X"));
        assert_eq!(kill.saved_by, None);
    }

    #[test]
    fn protection_without_protector_does_not_save() {
        let kill = resolve_kill(&pid("X"), Some(&pid("X")), None);
        assert!(kill.success);
    }

    #[test]
    fn kill_on_dead_or_wolf_target_is_invalid() {
        let mut state = six_player_state(GameConfig::default());
        state
            .eliminate(&pid("A1"), EliminationCause::Vote, PhaseKind::Day, 1)
            .unwrap();
        assert!(matches!(
            resolve_night_kill(&state, &pid("A1"), None, None),
            Err(WerewolfError::InvalidAction(_))
        ));
        assert!(matches!(
            resolve_night_kill(&state, &pid("A5"), None, None),
            Err(WerewolfError::InvalidAction(_))
        ));
        assert!(matches!(
            resolve_night_kill(&state, &pid("Z9"), None, None),
            Err(WerewolfError::InvalidAction(_))
        ));
        assert!(resolve_night_kill(&state, &pid("A4"), None, None).unwrap().success);
    }

    #[test]
    fn inspection_reports_wolf_role() {
        let state = six_player_state(GameConfig::default());
        assert!(inspect(&state, &pid("A2")).unwrap());
        assert!(!inspect(&state, &pid("A6")).unwrap());
        assert!(inspect(&state, &pid("nobody")).is_err());
    }

    #[test]
    fn wolf_decision_plurality_and_ties() {
        let split = vec![
            (pid("W1"), pid("A"), Some("loud".to_string())),
            (pid("W2"), pid("B"), None),
        ];
        let decision = wolf_team_decision(&split).unwrap();
        assert_eq!(decision.target, pid("A"));
        assert!(!decision.unanimous);
        assert_eq!(decision.reason.as_deref(), Some("loud"));

        let majority = vec![
            (pid("W1"), pid("A"), None),
            (pid("W2"), pid("B"), Some("quiet".to_string())),
            (pid("W3"), pid("B"), None),
        ];
        assert_eq!(wolf_team_decision(&majority).unwrap().target, pid("B"));

        let agreed = vec![(pid("W1"), pid("A"), None), (pid("W2"), pid("A"), None)];
        assert!(wolf_team_decision(&agreed).unwrap().unanimous);

        assert!(wolf_team_decision(&[]).is_none());
    }
}
