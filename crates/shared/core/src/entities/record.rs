use serde::{Deserialize, Serialize};

use super::lane::{LaneConfig, Layout};
use super::settings::Settings;
use crate::audit::SimulationStep;

/// The structured record exchanged with the persistence collaborator.
///
/// Every field is optional on the wire; missing ones take engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyRecord {
    pub lanes: Vec<LaneConfig>,
    pub settings: Settings,
    /// Saved bet layouts available to chain steps
    pub layouts: Vec<Layout>,
    pub history: Option<Vec<SimulationStep>>,
}

impl StrategyRecord {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn layout(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.name == name)
    }
}
