use serde::{Deserialize, Serialize};

use crate::entities::{Bet, LaneState};
use crate::table::SpinResult;
use crate::values::Money;

/// How a step closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepKind {
    /// Bets were placed and resolved against an outcome
    Resolved,
    /// Terminal record: the prepared wager exceeded the bankroll, nothing was placed
    InsufficientFunds { required: Money, available: Money },
}

/// Per-lane slice of a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    pub lane_id: String,
    pub wager: Money,
    /// Lane balance delta for this spin
    pub profit: Money,
    /// Lane running balance after this spin
    pub balance: Money,
    /// Progress the bets were prepared from
    pub state: LaneState,
    /// Session-profit reset happened before preparing this spin
    pub reset: bool,
}

/// A placed bet and how it fared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedBet {
    pub lane_id: String,
    pub bet: Bet,
    pub hit: bool,
    pub profit: Money,
}

/// Immutable audit record of one spin.
///
/// `bankroll_after == bankroll_before + net_profit` and the lane profits sum
/// to `net_profit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStep {
    /// 1-based spin number within the run
    pub index: u32,
    pub kind: StepKind,
    /// None for the terminal insufficient-funds record
    pub outcome: Option<SpinResult>,
    pub bankroll_before: Money,
    pub total_wager: Money,
    pub net_profit: Money,
    pub bankroll_after: Money,
    pub lanes: Vec<LaneSnapshot>,
    /// Human-readable descriptions of triggers that fired
    pub triggers: Vec<String>,
    pub bets: Vec<EvaluatedBet>,
    #[serde(default)]
    pub note: Option<String>,
}

impl SimulationStep {
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StepKind::InsufficientFunds { .. })
    }

    /// Check the bankroll identities this record must hold
    pub fn is_balanced(&self) -> bool {
        let lane_total: Money = self.lanes.iter().map(|l| l.profit).sum();
        self.bankroll_after == self.bankroll_before + self.net_profit
            && lane_total == self.net_profit
    }
}
