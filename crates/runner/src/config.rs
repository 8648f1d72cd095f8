//! Configuration loading for the runner
//!
//! A config file is a strategy record (lanes, settings, layouts) plus
//! pacing and an optional seed:
//!
//! ```json
//! {
//!   "settings": { "starting_bankroll": "500", "number_of_simulations": 20 },
//!   "lanes": [ { "id": "red-lane", "bets": [ ... ] } ],
//!   "pacing": { "speed": "fast" },
//!   "seed": 42
//! }
//! ```

use croupier_core::StrategyRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::pacing::PacingConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(flatten)]
    pub record: StrategyRecord,

    #[serde(default)]
    pub pacing: PacingConfig,

    /// Seed for the random outcome source
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunnerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
