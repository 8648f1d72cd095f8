use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::values::Money;

/// Table stake limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLimits {
    pub min: Money,
    pub max: Money,
}

/// Batch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub starting_bankroll: Money,
    pub table_min: Money,
    pub table_max: Money,
    pub spins_per_simulation: u32,
    pub number_of_simulations: u32,
    pub total_profit_goal: Money,
    pub use_total_profit_goal: bool,
    /// Whitespace/comma separated outcomes; non-empty switches to test mode
    pub fixed_outcome_sequence: Option<String>,
    /// Reject malformed fixed outcomes instead of degrading them to zero
    pub strict_outcomes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_bankroll: dec!(1000),
            table_min: dec!(1),
            table_max: dec!(500),
            spins_per_simulation: 100,
            number_of_simulations: 1,
            total_profit_goal: dec!(100),
            use_total_profit_goal: false,
            fixed_outcome_sequence: None,
            strict_outcomes: false,
        }
    }
}

impl Settings {
    pub fn limits(&self) -> TableLimits {
        TableLimits {
            min: self.table_min,
            max: self.table_max,
        }
    }

    /// The fixed sequence text, if test mode is on
    pub fn fixed_sequence(&self) -> Option<&str> {
        self.fixed_outcome_sequence
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn is_test_mode(&self) -> bool {
        self.fixed_sequence().is_some()
    }

    /// Profit goal reached for a bankroll, when the goal is enabled
    pub fn profit_goal_reached(&self, bankroll: Money) -> bool {
        self.use_total_profit_goal && bankroll - self.starting_bankroll >= self.total_profit_goal
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_bankroll <= Decimal::ZERO {
            return Err(TableError::InvalidSettings(format!(
                "starting bankroll must be positive, got {}",
                self.starting_bankroll
            )));
        }
        if self.spins_per_simulation == 0 {
            return Err(TableError::InvalidSettings(
                "spins per simulation must be at least 1".to_string(),
            ));
        }
        if self.number_of_simulations == 0 {
            return Err(TableError::InvalidSettings(
                "number of simulations must be at least 1".to_string(),
            ));
        }
        if self.table_min < Decimal::ZERO || self.table_min > self.table_max {
            return Err(TableError::InvalidSettings(format!(
                "table limits out of order: min={}, max={}",
                self.table_min, self.table_max
            )));
        }
        Ok(())
    }
}
