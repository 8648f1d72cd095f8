use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bet::Wager;
use crate::table::Placement;
use crate::values::Money;

fn default_true() -> bool {
    true
}

fn default_lane_color() -> String {
    "#d4af37".to_string()
}

/// A named, saved bet set. Chain steps are layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    #[serde(default)]
    pub bets: Vec<Wager>,
}

impl Layout {
    pub fn new(name: impl Into<String>, bets: Vec<Wager>) -> Self {
        Self {
            name: name.into(),
            bets,
        }
    }
}

/// Which state machine drives a lane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressionMode {
    #[default]
    Static,
    Rotating,
    Chain,
}

/// Multiplier rule applied after a Static-mode spin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Reset,
    Multiply,
    AddUnits,
    SubtractUnits,
    Fibonacci,
    #[default]
    DoNothing,
    /// Any tag this engine does not know; behaves like DoNothing
    #[serde(other)]
    Unknown,
}

/// A progression action with its optional numeric argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressionAction {
    pub kind: ActionKind,
    #[serde(default)]
    pub value: Option<Decimal>,
}

impl ProgressionAction {
    pub fn new(kind: ActionKind) -> Self {
        Self { kind, value: None }
    }

    pub fn with_value(kind: ActionKind, value: Decimal) -> Self {
        Self {
            kind,
            value: Some(value),
        }
    }
}

/// Parameters of Rotating mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatingConfig {
    /// Comma-separated keywords, e.g. "red, black, odd"
    pub sequence: String,
    pub base_unit: Money,
    pub start_units: i64,
    pub min_units: i64,
    pub on_win_units: i64,
    pub on_loss_units: i64,
    pub rotate_on_win: bool,
    pub rotate_on_loss: bool,
}

impl Default for RotatingConfig {
    fn default() -> Self {
        Self {
            sequence: String::new(),
            base_unit: Decimal::ONE,
            start_units: 1,
            min_units: 1,
            on_win_units: 0,
            on_loss_units: 0,
            rotate_on_win: false,
            rotate_on_loss: false,
        }
    }
}

/// What a Chain lane does with its step index after a spin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChainAction {
    RestartChain,
    PrevChainStep,
    NextChainStep,
    #[default]
    DoNothing,
    #[serde(other)]
    Unknown,
}

/// Parameters of Chain mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub steps: Vec<Layout>,
    pub on_win: ChainAction,
    pub on_loss: ChainAction,
    /// Wrap to the first step after the last one
    pub looping: bool,
}

/// Lane progression: the mode tag plus every mode's parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub mode: ProgressionMode,
    /// Static mode rule after a win (profit >= 0)
    pub on_win: ProgressionAction,
    /// Static mode rule after a loss
    pub on_loss: ProgressionAction,
    /// Reset all progress once session profit reaches `session_profit_target`
    pub reset_on_session_profit: bool,
    pub session_profit_target: Money,
    pub rotating: RotatingConfig,
    pub chain: ChainConfig,
}

/// Streak polarity of a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerRule {
    /// Consecutive spins the target did not cover
    MissStreak,
    /// Consecutive spins the target covered
    HitStreak,
}

/// "If streak then bet" rule layered on top of a lane's strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerBet {
    #[serde(default)]
    pub label: String,
    pub target: Placement,
    pub rule: TriggerRule,
    pub threshold: u32,
    pub bet: Wager,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// An independently configured betting channel.
///
/// Configuration only: run-time progress lives in [`LaneState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_lane_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Base bet set (Static mode)
    #[serde(default)]
    pub bets: Vec<Wager>,
    #[serde(default)]
    pub triggers: Vec<TriggerBet>,
    #[serde(default)]
    pub progression: ProgressionConfig,
}

impl LaneConfig {
    /// Enabled static lane with the given base bets
    pub fn new(id: impl Into<String>, bets: Vec<Wager>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            color: default_lane_color(),
            enabled: true,
            bets,
            triggers: Vec::new(),
            progression: ProgressionConfig::default(),
        }
    }

    pub fn with_progression(mut self, progression: ProgressionConfig) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerBet) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Whether anything in this lane can ever put money on the table
    ///
    /// Only the collection the selected mode plays counts, plus enabled triggers.
    pub fn has_any_bets(&self) -> bool {
        let strategy_bets = match self.progression.mode {
            ProgressionMode::Static => !self.bets.is_empty(),
            ProgressionMode::Rotating => !self.progression.rotating.sequence.trim().is_empty(),
            ProgressionMode::Chain => self
                .progression
                .chain
                .steps
                .iter()
                .any(|step| !step.bets.is_empty()),
        };
        strategy_bets || self.triggers.iter().any(|t| t.enabled)
    }
}

/// Per-run mutable progress of a lane (the RuntimeLane progress block)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneState {
    /// Static stake multiplier, always >= 1
    pub multiplier: Decimal,
    /// Position in the Fibonacci table
    pub progression_index: usize,
    pub rotating_index: usize,
    pub rotating_units: i64,
    /// Net profit since the last progression reset
    pub session_profit: Money,
    pub chain_index: usize,
}

impl LaneState {
    pub fn initial(rotating_units: i64) -> Self {
        Self {
            multiplier: Decimal::ONE,
            progression_index: 0,
            rotating_index: 0,
            rotating_units,
            session_profit: Decimal::ZERO,
            chain_index: 0,
        }
    }
}

impl Default for LaneState {
    fn default() -> Self {
        Self::initial(1)
    }
}
