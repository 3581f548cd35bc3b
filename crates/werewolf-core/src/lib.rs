//! werewolf-core: Shared types, configuration, and error handling for the werewolf referee.
//!
//! This crate provides the foundational types used by the referee and the
//! post-game analytics:
//! - Player identity, roles, alignments and night capabilities
//! - Public history events and elimination records
//! - Game rule configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::GameConfig;
pub use error::{Result, WerewolfError};
pub use events::{Elimination, HistoryEvent, NightEvent};
pub use types::{
    Alignment, EliminationCause, GameId, NightCapability, Phase, PhaseKind, PlayerCard, PlayerId,
    RatingHints, Role,
};
