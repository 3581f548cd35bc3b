//! Public history events and elimination records.
//!
//! Everything in [`HistoryEvent`] is visible to every player. Private facts
//! (inspection results, who protected whom) never appear here; a player's role
//! is only attached at the moment of their elimination, and only when the
//! game configuration reveals roles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Alignment, EliminationCause, Phase, PhaseKind, PlayerId, Role};

/// A graveyard entry. Carries the full (private) role information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Elimination {
    pub player_id: PlayerId,
    pub cause: EliminationCause,
    pub phase: PhaseKind,
    pub number: u32,
    pub role: Role,
    pub alignment: Alignment,
}

impl Elimination {
    /// The public announcement of this elimination.
    pub fn public_event(&self, reveal_role: bool) -> HistoryEvent {
        HistoryEvent::Elimination {
            phase: self.phase,
            number: self.number,
            cause: self.cause,
            player_id: self.player_id.clone(),
            role: reveal_role.then_some(self.role),
            alignment: reveal_role.then_some(self.alignment),
        }
    }
}

/// A public history entry, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HistoryEvent {
    /// A player left the game.
    Elimination {
        phase: PhaseKind,
        number: u32,
        cause: EliminationCause,
        player_id: PlayerId,
        role: Option<Role>,
        alignment: Option<Alignment>,
    },
    /// The wolves' kill succeeded.
    NightKill { night: u32, player_id: PlayerId },
    /// Nobody died in the night.
    NoKill { night: u32 },
    /// The day vote ended without an elimination.
    NoElimination {
        day: u32,
        tally: BTreeMap<PlayerId, u32>,
    },
}

impl HistoryEvent {
    /// The phase this event belongs to.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Elimination { phase, number, .. } => match phase {
                PhaseKind::Night => Phase::Night(*number),
                PhaseKind::Day => Phase::Day(*number),
            },
            Self::NightKill { night, .. } | Self::NoKill { night } => Phase::Night(*night),
            Self::NoElimination { day, .. } => Phase::Day(*day),
        }
    }
}

/// The outcome of a night, as announced to the town.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NightEvent {
    Kill { player_id: PlayerId },
    NoKill,
}

impl NightEvent {
    pub fn into_history(self, night: u32) -> HistoryEvent {
        match self {
            Self::Kill { player_id } => HistoryEvent::NightKill { night, player_id },
            Self::NoKill => HistoryEvent::NoKill { night },
        }
    }

    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            Self::Kill { player_id } => Some(player_id),
            Self::NoKill => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf_elimination() -> Elimination {
        Elimination {
            player_id: PlayerId::from("A5"),
            cause: EliminationCause::Vote,
            phase: PhaseKind::Day,
            number: 2,
            role: Role::Werewolf,
            alignment: Alignment::Wolves,
        }
    }

    #[test]
    fn history_event_tags() {
        let json = serde_json::to_string(&HistoryEvent::NoKill { night: 1 }).unwrap();
        assert!(json.contains("\"event\":\"no_kill\""));
    }

    #[test]
    fn public_event_hides_role_when_not_revealed() {
        let event = wolf_elimination().public_event(false);
        match event {
            HistoryEvent::Elimination {
                role, alignment, ..
            } => {
                assert!(role.is_none());
                assert!(alignment.is_none());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn public_event_reveals_role_on_elimination() {
        let event = wolf_elimination().public_event(true);
        assert_eq!(event.phase(), Phase::Day(2));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"role\":\"werewolf\""));
    }

    #[test]
    fn night_event_converts_to_history() {
        let event = NightEvent::Kill {
            player_id: PlayerId::from("A4"),
        };
        assert_eq!(event.player(), Some(&PlayerId::from("A4")));
        assert_eq!(
            event.into_history(1),
            HistoryEvent::NightKill {
                night: 1,
                player_id: PlayerId::from("A4"),
            }
        );
    }
}
