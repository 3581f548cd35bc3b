//! werewolf-referee: Game state, resolution and record assembly.
//!
//! Takes agent decisions that were already made (night actions, discussion,
//! votes), validates them against the live [`GameState`], resolves each phase
//! and freezes the match into a sealed [`GameRecord`].

pub mod hash;
pub mod orchestrator;
pub mod phase;
pub mod record;
pub mod rules;
pub mod scenario;
pub mod state;

pub use orchestrator::{build_phase, run_phases};
pub use phase::{DayPhaseRecord, NightPhaseRecord, PhaseRecord, PublicState};
pub use record::{build_record, FinalResult, GameRecord, Survivor};
pub use rules::{resolve_kill, resolve_night_kill, resolve_vote, NightKill, VoteOutcome};
pub use scenario::{DayPhaseSpec, FinalResultSpec, NightAction, NightPhaseSpec, PhaseSpec};
pub use state::GameState;
