//! Influence metrics: swing votes and early wagon credit.
//!
//! Both only apply to days that ended in an elimination. Votes are taken in
//! cast order.

use std::collections::BTreeMap;

use werewolf_core::PlayerId;

/// Running tally after each vote, in cast order.
pub fn tally_progression(votes: &[(PlayerId, PlayerId)]) -> Vec<BTreeMap<PlayerId, u32>> {
    let mut tally: BTreeMap<PlayerId, u32> = BTreeMap::new();
    votes
        .iter()
        .map(|(_, target)| {
            *tally.entry(target.clone()).or_insert(0) += 1;
            tally.clone()
        })
        .collect()
}

/// Whether `target` holds a unique maximum in `tally`.
pub fn holds_strict_lead(tally: &BTreeMap<PlayerId, u32>, target: &PlayerId) -> bool {
    let Some(&count) = tally.get(target) else {
        return false;
    };
    tally.iter().all(|(pid, &c)| pid == target || c < count)
}

/// Index of the vote that put `target` into a lead it kept for the rest of
/// the day: the earliest index from which `target` strictly leads at every
/// later point. `None` if `target` does not lead at the end.
pub fn swing_index(progression: &[BTreeMap<PlayerId, u32>], target: &PlayerId) -> Option<usize> {
    let mut swing = None;
    for (idx, tally) in progression.iter().enumerate().rev() {
        if !holds_strict_lead(tally, target) {
            break;
        }
        swing = Some(idx);
    }
    swing
}

/// The voter credited with the day's swing vote, if any.
pub fn swing_voter<'a>(votes: &'a [(PlayerId, PlayerId)], target: &PlayerId) -> Option<&'a PlayerId> {
    let progression = tally_progression(votes);
    swing_index(&progression, target).map(|idx| &votes[idx].0)
}

/// Voters in the first half of the wagon on `target` (rounded up, at least
/// one), in cast order.
pub fn early_wagon<'a>(votes: &'a [(PlayerId, PlayerId)], target: &PlayerId) -> Vec<&'a PlayerId> {
    let wagon: Vec<&PlayerId> = votes
        .iter()
        .filter(|(_, t)| t == target)
        .map(|(voter, _)| voter)
        .collect();
    let half = wagon.len().div_ceil(2).max(1);
    wagon.into_iter().take(half).collect()
}
