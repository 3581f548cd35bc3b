//! Timelines extracted from a game record: discussion messages, votes and
//! the "mention graph" between speakers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use werewolf_core::PlayerId;
use werewolf_referee::GameRecord;

/// One discussion turn, flattened across days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineMessage {
    pub day: u32,
    /// Position within the day's discussion.
    pub order: usize,
    pub player_id: PlayerId,
    pub text: String,
}

/// A speech that names another player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MentionEdge {
    pub speaker: PlayerId,
    pub target: PlayerId,
    pub day: u32,
}

/// All discussion turns in record order.
pub fn message_timeline(record: &GameRecord) -> Vec<TimelineMessage> {
    record
        .phases
        .iter()
        .filter_map(|p| p.as_day())
        .flat_map(|day| {
            day.discussion
                .iter()
                .enumerate()
                .map(move |(order, turn)| TimelineMessage {
                    day: day.day_number,
                    order,
                    player_id: turn.player_id.clone(),
                    text: turn.speech.clone(),
                })
        })
        .collect()
}

/// Accepted votes per day as `(voter, target)`, in cast order.
pub fn vote_timeline(record: &GameRecord) -> BTreeMap<u32, Vec<(PlayerId, PlayerId)>> {
    record
        .phases
        .iter()
        .filter_map(|p| p.as_day())
        .map(|day| {
            let votes = day
                .voting
                .responses
                .iter()
                .map(|v| (v.voter.clone(), v.target.clone()))
                .collect();
            (day.day_number, votes)
        })
        .collect()
}

/// Speaker → named player edges. A player is named when their id or alias
/// appears as a whole word, ignoring case. At most one edge per target per
/// turn; self-mentions are dropped.
pub fn mention_edges(record: &GameRecord) -> Vec<MentionEdge> {
    let names: Vec<(PlayerId, Vec<String>)> = record
        .players
        .iter()
        .map(|card| {
            let mut names = vec![card.id.as_str().to_lowercase()];
            if let Some(alias) = card.alias.as_deref().filter(|a| !a.trim().is_empty()) {
                names.push(alias.to_lowercase());
            }
            (card.id.clone(), names)
        })
        .collect();

    let mut edges = Vec::new();
    for message in message_timeline(record) {
        let text = message.text.to_lowercase();
        for (target, target_names) in &names {
            if *target == message.player_id {
                continue;
            }
            if target_names.iter().any(|n| contains_word(&text, n)) {
                edges.push(MentionEdge {
                    speaker: message.player_id.clone(),
                    target: target.clone(),
                    day: message.day,
                });
            }
        }
    }
    edges
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}
