//! Run and batch results

use chrono::{DateTime, Utc};
use croupier_core::{BatchStats, Money, RunOutcome, RunResult, SimulationStep};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a run stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunEnd {
    SpinLimit,
    SequenceExhausted,
    Bankrupt,
    ProfitGoal,
    InsufficientFunds { required: Money, available: Money },
    Cancelled,
}

impl std::fmt::Display for RunEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunEnd::SpinLimit => f.write_str("spin limit reached"),
            RunEnd::SequenceExhausted => f.write_str("fixed sequence exhausted"),
            RunEnd::Bankrupt => f.write_str("bankroll exhausted"),
            RunEnd::ProfitGoal => f.write_str("profit goal reached"),
            RunEnd::InsufficientFunds {
                required,
                available,
            } => write!(f, "insufficient funds ({} needed, {} available)", required, available),
            RunEnd::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// One run of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// 0-based run number
    pub run: u32,
    pub starting_bankroll: Money,
    pub final_bankroll: Money,
    /// Resolved spins (the terminal shortfall record is not a spin)
    pub spins: u32,
    pub result: RunResult,
    pub end: RunEnd,
    pub steps: Vec<SimulationStep>,
}

impl RunRecord {
    pub fn is_cancelled(&self) -> bool {
        self.end == RunEnd::Cancelled
    }

    pub fn outcome(&self) -> RunOutcome {
        RunOutcome {
            final_bankroll: self.final_bankroll,
            spins: self.spins,
            result: self.result,
        }
    }
}

/// Everything a batch produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub runs: Vec<RunRecord>,
    /// Over completed runs only
    pub stats: BatchStats,
    pub cancelled: bool,
    /// Non-fatal notes, e.g. degraded fixed outcomes
    pub diagnostics: Vec<String>,
}

impl BatchReport {
    pub fn completed_runs(&self) -> impl Iterator<Item = &RunRecord> {
        self.runs.iter().filter(|r| !r.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_run_end_wire_format() {
        let json = serde_json::to_string(&RunEnd::InsufficientFunds {
            required: dec!(50),
            available: dec!(10),
        })
        .unwrap();
        assert!(json.contains(r#""reason":"INSUFFICIENT_FUNDS""#));

        let end: RunEnd = serde_json::from_str(r#"{ "reason": "SPIN_LIMIT" }"#).unwrap();
        assert_eq!(end, RunEnd::SpinLimit);
    }

    #[test]
    fn test_run_end_display() {
        let end = RunEnd::InsufficientFunds {
            required: dec!(50),
            available: dec!(10),
        };
        assert_eq!(end.to_string(), "insufficient funds (50 needed, 10 available)");
    }
}
