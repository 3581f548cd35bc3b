//! Game rule configuration.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`WEREWOLF__GAME__` prefix, e.g. `WEREWOLF__GAME__FIRST_DAY`)
//! 2. Config file (werewolf.toml, `[game]` section)
//! 3. Defaults

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Role;

/// Rule options for a single match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    /// Record schema identifier stamped on every game record.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Declared role bag. When non-empty the role assignment must use
    /// exactly these roles.
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Announce the role and alignment of eliminated players.
    #[serde(default = "default_true")]
    pub reveal_role_on_elimination: bool,

    /// Whether wolves may talk privately at night.
    #[serde(default = "default_true")]
    pub wolf_chat_at_night: bool,

    #[serde(default)]
    pub doctor_can_self_protect: bool,

    /// Word limit carried on every discussion turn.
    #[serde(default = "default_max_words")]
    pub max_words_day_talk: usize,

    #[serde(default = "default_first_phase")]
    pub first_day: u32,

    #[serde(default = "default_first_phase")]
    pub first_night: u32,

    /// Wolves also win once they match the living town in number.
    #[serde(default)]
    pub wolf_parity_wins: bool,
}

fn default_schema_version() -> String {
    "werewolf.v1".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_words() -> usize {
    120
}

fn default_first_phase() -> u32 {
    1
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            roles: Vec::new(),
            reveal_role_on_elimination: true,
            wolf_chat_at_night: true,
            doctor_can_self_protect: false,
            max_words_day_talk: default_max_words(),
            first_day: default_first_phase(),
            first_night: default_first_phase(),
            wolf_parity_wins: false,
        }
    }
}

/// Load the game configuration from `{file_prefix}.toml` and the environment.
///
/// A missing file or a missing `[game]` section yields the defaults.
pub fn load_game_config(file_prefix: &str) -> Result<GameConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("WEREWOLF")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<GameConfig>("game") {
        Ok(c) => Ok(c),
        Err(config::ConfigError::NotFound(_)) => Ok(GameConfig::default()),
        Err(e) => Err(e.into()),
    }
}
