use thiserror::Error;

/// Top-level error type for the werewolf referee.
#[derive(Error, Debug)]
pub enum WerewolfError {
    /// A submitted action references a dead or unknown player, or is not
    /// permitted for the actor's role.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// The game state does not allow the requested transition.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for WerewolfError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WerewolfError>;
