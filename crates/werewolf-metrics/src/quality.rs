//! Decision-quality scoring of day votes.

use std::collections::BTreeSet;

use werewolf_core::{Alignment, PlayerId};
use werewolf_referee::GameRecord;

use crate::report::{AgentDecisionQuality, DayDecisionQuality};

fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        f64::from(num) / f64::from(den)
    }
}

/// Score one day's votes.
///
/// `wolves_alive` is the set of wolves alive when the day began;
/// `eliminated` is the player the day's vote removed, if any.
pub fn score_day(
    record: &GameRecord,
    day_number: u32,
    votes: &[(PlayerId, PlayerId)],
    wolves_alive: &BTreeSet<PlayerId>,
    eliminated: Option<&PlayerId>,
) -> DayDecisionQuality {
    let mut town_votes = 0;
    let mut town_on_wolves = 0;
    let mut wolves_voted = BTreeSet::new();

    for (voter, target) in votes {
        let target_is_wolf = record.alignment_of(target) == Some(Alignment::Wolves);
        if target_is_wolf {
            wolves_voted.insert(target);
        }
        if record.alignment_of(voter) == Some(Alignment::Town) {
            town_votes += 1;
            if target_is_wolf {
                town_on_wolves += 1;
            }
        }
    }

    let mis_elimination = eliminated
        .and_then(|pid| record.role_of(pid))
        .is_some_and(|role| !role.is_wolf());

    DayDecisionQuality {
        day_number,
        town_precision: ratio(town_on_wolves, town_votes),
        town_recall: ratio(wolves_voted.len() as u32, wolves_alive.len() as u32),
        mis_elimination,
    }
}

/// Running vote counts for one agent across all days.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoteCounts {
    on_enemy: u32,
    on_wolf: u32,
    on_town: u32,
}

impl VoteCounts {
    pub fn add(&mut self, voter: Alignment, target: Alignment) {
        match target {
            Alignment::Wolves => self.on_wolf += 1,
            Alignment::Town => self.on_town += 1,
        }
        if voter.opposing() == target {
            self.on_enemy += 1;
        }
    }

    pub fn finish(self, alignment: Alignment) -> AgentDecisionQuality {
        let total = self.on_wolf + self.on_town;
        AgentDecisionQuality {
            votes_on_enemies_rate: ratio(self.on_enemy, total),
            wolves_voted: self.on_wolf,
            town_voted: self.on_town,
            bus_rate: (alignment == Alignment::Wolves).then(|| ratio(self.on_wolf, total)),
        }
    }
}
