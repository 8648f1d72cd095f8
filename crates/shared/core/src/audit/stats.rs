use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::values::Money;

/// Run classification against the starting bankroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunResult {
    Win,
    Loss,
    Tie,
}

impl RunResult {
    pub fn classify(starting: Money, final_bankroll: Money) -> Self {
        match final_bankroll.cmp(&starting) {
            Ordering::Greater => RunResult::Win,
            Ordering::Less => RunResult::Loss,
            Ordering::Equal => RunResult::Tie,
        }
    }
}

/// What the aggregator needs from one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub final_bankroll: Money,
    pub spins: u32,
    pub result: RunResult,
}

/// Summary over a set of runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub runs: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub avg_final_bankroll: Money,
    pub best_final_bankroll: Money,
    pub worst_final_bankroll: Money,
    pub avg_spins: Decimal,
}

/// Reduce run outcomes to batch statistics. Pure; empty input gives zeros.
pub fn aggregate(runs: &[RunOutcome]) -> BatchStats {
    if runs.is_empty() {
        return BatchStats::default();
    }

    let count = Decimal::from(runs.len());
    let count_of = |wanted: RunResult| runs.iter().filter(|r| r.result == wanted).count() as u32;

    let total_bankroll: Money = runs.iter().map(|r| r.final_bankroll).sum();
    let total_spins: Decimal = runs.iter().map(|r| Decimal::from(r.spins)).sum();

    BatchStats {
        runs: runs.len() as u32,
        wins: count_of(RunResult::Win),
        losses: count_of(RunResult::Loss),
        ties: count_of(RunResult::Tie),
        avg_final_bankroll: total_bankroll / count,
        best_final_bankroll: runs
            .iter()
            .map(|r| r.final_bankroll)
            .max()
            .unwrap_or_default(),
        worst_final_bankroll: runs
            .iter()
            .map(|r| r.final_bankroll)
            .min()
            .unwrap_or_default(),
        avg_spins: total_spins / count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn outcome(final_bankroll: Money, spins: u32) -> RunOutcome {
        RunOutcome {
            final_bankroll,
            spins,
            result: RunResult::classify(dec!(100), final_bankroll),
        }
    }

    #[test]
    fn test_aggregate_counts_and_extremes() {
        let runs = vec![
            outcome(dec!(150), 10),
            outcome(dec!(40), 20),
            outcome(dec!(100), 30),
        ];
        let stats = aggregate(&runs);

        assert_eq!(stats.runs, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.ties, 1);
        assert_eq!(stats.best_final_bankroll, dec!(150));
        assert_eq!(stats.worst_final_bankroll, dec!(40));
        assert_eq!(stats.avg_spins, dec!(20));
    }

    #[test]
    fn test_average_is_arithmetic_mean() {
        let runs = vec![outcome(dec!(10), 1), outcome(dec!(20), 1), outcome(dec!(33), 1)];
        let stats = aggregate(&runs);
        assert_eq!(stats.avg_final_bankroll, dec!(63) / dec!(3));
    }

    #[test]
    fn test_aggregate_is_pure() {
        let runs = vec![outcome(dec!(90), 5), outcome(dec!(120), 7)];
        assert_eq!(aggregate(&runs), aggregate(&runs));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate(&[]), BatchStats::default());
    }
}
