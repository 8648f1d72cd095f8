//! Pacing - how fast the simulation task walks through spins
//!
//! - `Fast`: no delay, yields to the runtime every few spins
//! - `Moderate`: fixed delay before every spin
//! - `Step`: waits for an explicit step signal before every spin

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    #[default]
    Fast,
    Moderate,
    Step,
}

impl Speed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speed::Fast => "fast",
            Speed::Moderate => "moderate",
            Speed::Step => "step",
        }
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Speed::Fast),
            "moderate" => Ok(Speed::Moderate),
            "step" | "manual" => Ok(Speed::Step),
            other => Err(format!(
                "unknown speed '{}', expected fast, moderate or step",
                other
            )),
        }
    }
}

/// Pacing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub speed: Speed,
    /// Delay before each spin at moderate speed
    pub moderate_delay_ms: u64,
    /// Yield to the runtime every N spins at fast speed
    pub fast_yield_every: u32,
    /// Steps coalesced into one progress event
    pub progress_batch: usize,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            speed: Speed::Fast,
            moderate_delay_ms: 250,
            fast_yield_every: 20,
            progress_batch: 25,
        }
    }
}

impl PacingConfig {
    pub fn with_speed(speed: Speed) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    pub fn moderate_delay(&self) -> Duration {
        Duration::from_millis(self.moderate_delay_ms)
    }
}
