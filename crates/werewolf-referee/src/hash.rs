//! BLAKE3 content hashing for tamper evidence.
//!
//! Hashes every game record field except `content_hash` itself, so any later
//! edit to the record is detectable.

use std::collections::BTreeMap;

use serde::Serialize;
use werewolf_core::{GameConfig, GameId, Phase, PlayerCard, PlayerId, Result, Role};

use crate::phase::PhaseRecord;
use crate::record::{FinalResult, GameRecord};

/// Hashable view of a [`GameRecord`] (excludes `content_hash`).
#[derive(Serialize)]
struct HashableRecord<'a> {
    schema_version: &'a str,
    game_id: &'a GameId,
    created_at: &'a chrono::DateTime<chrono::Utc>,
    seed: u64,
    config: &'a GameConfig,
    players: &'a [PlayerCard],
    role_assignment: &'a BTreeMap<PlayerId, Role>,
    phase_sequence: &'a [Phase],
    phases: &'a [PhaseRecord],
    final_result: &'a FinalResult,
}

/// Compute the hex-encoded BLAKE3 hash of a record's content.
pub fn compute_record_hash(record: &GameRecord) -> Result<String> {
    let hashable = HashableRecord {
        schema_version: &record.schema_version,
        game_id: &record.game_id,
        created_at: &record.created_at,
        seed: record.seed,
        config: &record.config,
        players: &record.players,
        role_assignment: &record.role_assignment,
        phase_sequence: &record.phase_sequence,
        phases: &record.phases,
        final_result: &record.final_result,
    };

    let json = serde_json::to_vec(&hashable)?;
    Ok(blake3::hash(&json).to_hex().to_string())
}
