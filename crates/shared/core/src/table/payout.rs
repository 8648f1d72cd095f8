use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::outcome::SpinResult;
use super::placement::{BetCategory, Placement};
use crate::entities::{Bet, BetId};
use crate::values::Money;

/// Payout ratios keyed by bet category (ratio N means N:1)
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutTable {
    ratios: BTreeMap<BetCategory, Decimal>,
}

impl Default for PayoutTable {
    /// Standard American double-zero wheel
    fn default() -> Self {
        let ratios = [
            (BetCategory::Straight, dec!(35)),
            (BetCategory::Split, dec!(17)),
            (BetCategory::Street, dec!(11)),
            (BetCategory::Corner, dec!(8)),
            (BetCategory::Basket, dec!(6)),
            (BetCategory::SixLine, dec!(5)),
            (BetCategory::Dozen, dec!(2)),
            (BetCategory::Column, dec!(2)),
            (BetCategory::Red, dec!(1)),
            (BetCategory::Black, dec!(1)),
            (BetCategory::Even, dec!(1)),
            (BetCategory::Odd, dec!(1)),
            (BetCategory::Low, dec!(1)),
            (BetCategory::High, dec!(1)),
        ]
        .into_iter()
        .collect();
        Self { ratios }
    }
}

impl PayoutTable {
    /// Override or add the ratio for a category
    pub fn with_ratio(mut self, category: BetCategory, ratio: Decimal) -> Self {
        self.ratios.insert(category, ratio);
        self
    }

    /// Ratio for a placement, falling back to `36 / covered - 1` for unlisted categories
    pub fn ratio_for(&self, placement: &Placement) -> Decimal {
        if let Some(ratio) = self.ratios.get(&placement.category) {
            return *ratio;
        }
        match placement.covered_count() {
            0 => Decimal::ZERO,
            covered => dec!(36) / Decimal::from(covered) - Decimal::ONE,
        }
    }
}

/// Result of one bet against one outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetResolution {
    pub bet_id: BetId,
    pub hit: bool,
    pub stake: Money,
    /// Stake plus winnings on a hit, zero on a miss
    pub returned: Money,
    /// returned - stake
    pub profit: Money,
}

/// Result of a lane's bets against one outcome
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneResolution {
    pub bets: Vec<BetResolution>,
    pub wager: Money,
    pub profit: Money,
}

impl LaneResolution {
    /// Push counts as a win for progression purposes
    pub fn is_win(&self) -> bool {
        self.profit >= Decimal::ZERO
    }
}

/// Computes payouts and net profit for placed bets
#[derive(Debug, Clone, Default)]
pub struct SpinResolver {
    table: PayoutTable,
}

impl SpinResolver {
    pub fn new(table: PayoutTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PayoutTable {
        &self.table
    }

    pub fn resolve_bet(&self, bet: &Bet, outcome: &SpinResult) -> BetResolution {
        let hit = bet.placement.covers(outcome.value);
        let returned = if hit {
            bet.amount * (Decimal::ONE + self.table.ratio_for(&bet.placement))
        } else {
            Decimal::ZERO
        };
        BetResolution {
            bet_id: bet.id,
            hit,
            stake: bet.amount,
            returned,
            profit: returned - bet.amount,
        }
    }

    /// Resolve every bet of a lane and sum wager and profit
    pub fn resolve(&self, bets: &[Bet], outcome: &SpinResult) -> LaneResolution {
        let bets: Vec<BetResolution> = bets
            .iter()
            .map(|bet| self.resolve_bet(bet, outcome))
            .collect();
        let wager = bets.iter().map(|b| b.stake).sum();
        let profit = bets.iter().map(|b| b.profit).sum();
        LaneResolution {
            bets,
            wager,
            profit,
        }
    }
}
