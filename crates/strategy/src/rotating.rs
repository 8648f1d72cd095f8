//! Rotating Strategy
//!
//! Walks a compiled keyword sequence (red, black, odd, ...), staking
//! `units × base_unit` on the current placement. Units and position move
//! after every spin according to the win/loss deltas and rotate flags.

use croupier_core::{
    LaneState, Money, Placement, ProgressionMode, Result, RotatingConfig, SpinResult,
    TableLimits, Wager, parse_sequence,
};
use rust_decimal::Decimal;

use crate::strategy::LaneStrategy;

#[derive(Debug, Clone)]
pub struct RotatingStrategy {
    sequence: Vec<Placement>,
    config: RotatingConfig,
    limits: TableLimits,
}

impl RotatingStrategy {
    /// Compile the sequence; an unknown keyword fails the whole lane
    pub fn new(config: &RotatingConfig, limits: TableLimits) -> Result<Self> {
        Ok(Self {
            sequence: parse_sequence(&config.sequence)?,
            config: config.clone(),
            limits,
        })
    }

    pub fn sequence(&self) -> &[Placement] {
        &self.sequence
    }

    fn stake(&self, units: i64) -> Money {
        Decimal::from(units)
            .checked_mul(self.config.base_unit)
            .unwrap_or(self.limits.max)
            .max(self.limits.min)
            .min(self.limits.max)
    }
}

impl LaneStrategy for RotatingStrategy {
    fn mode(&self) -> ProgressionMode {
        ProgressionMode::Rotating
    }

    fn initial_state(&self) -> LaneState {
        LaneState::initial(self.config.start_units.max(self.config.min_units))
    }

    fn prepare(&self, state: &LaneState, _history: &[SpinResult]) -> Vec<Wager> {
        if self.sequence.is_empty() {
            return Vec::new();
        }
        let placement = &self.sequence[state.rotating_index % self.sequence.len()];
        let amount = self.stake(state.rotating_units);
        if amount <= Decimal::ZERO {
            return Vec::new();
        }
        vec![Wager::new(placement.clone(), amount)]
    }

    fn advance(&self, state: &LaneState, profit: Money) -> LaneState {
        let (delta, rotate) = if profit >= Decimal::ZERO {
            (self.config.on_win_units, self.config.rotate_on_win)
        } else {
            (self.config.on_loss_units, self.config.rotate_on_loss)
        };

        let mut next = *state;
        next.rotating_units = state
            .rotating_units
            .saturating_add(delta)
            .max(self.config.min_units);
        if rotate && !self.sequence.is_empty() {
            next.rotating_index = (state.rotating_index + 1) % self.sequence.len();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn limits() -> TableLimits {
        TableLimits {
            min: dec!(1),
            max: dec!(500),
        }
    }

    fn red_black() -> RotatingStrategy {
        let config = RotatingConfig {
            sequence: "red, black".to_string(),
            base_unit: dec!(5),
            start_units: 1,
            min_units: 1,
            on_loss_units: 1,
            rotate_on_loss: true,
            ..RotatingConfig::default()
        };
        RotatingStrategy::new(&config, limits()).unwrap()
    }

    #[test]
    fn test_rotates_and_climbs_on_loss() {
        let strategy = red_black();
        let mut state = strategy.initial_state();

        let mut placements = Vec::new();
        let mut units = Vec::new();
        for spin in 0..3 {
            let wagers = strategy.prepare(&state, &[]);
            assert_eq!(wagers.len(), 1);
            placements.push(wagers[0].placement.clone());
            units.push(state.rotating_units);
            assert_eq!(wagers[0].amount, dec!(5) * Decimal::from(state.rotating_units));
            if spin < 2 {
                state = strategy.advance(&state, -wagers[0].amount);
            }
        }

        assert_eq!(
            placements,
            vec![Placement::red(), Placement::black(), Placement::red()]
        );
        assert_eq!(units, vec![1, 2, 3]);
    }

    #[test]
    fn test_units_floor_at_minimum() {
        let config = RotatingConfig {
            sequence: "odd".to_string(),
            start_units: 3,
            min_units: 2,
            on_win_units: -5,
            ..RotatingConfig::default()
        };
        let strategy = RotatingStrategy::new(&config, limits()).unwrap();

        let state = strategy.advance(&strategy.initial_state(), dec!(1));
        assert_eq!(state.rotating_units, 2);
        assert_eq!(state.rotating_index, 0);
    }

    #[test]
    fn test_stake_clamped_to_table_limits() {
        let config = RotatingConfig {
            sequence: "high".to_string(),
            base_unit: dec!(100),
            start_units: 9,
            ..RotatingConfig::default()
        };
        let strategy = RotatingStrategy::new(&config, limits()).unwrap();
        let wagers = strategy.prepare(&strategy.initial_state(), &[]);
        assert_eq!(wagers[0].amount, dec!(500));

        let config = RotatingConfig {
            sequence: "low".to_string(),
            base_unit: dec!(0.25),
            ..RotatingConfig::default()
        };
        let strategy = RotatingStrategy::new(&config, limits()).unwrap();
        let wagers = strategy.prepare(&strategy.initial_state(), &[]);
        assert_eq!(wagers[0].amount, dec!(1));
    }

    #[test]
    fn test_runaway_units_stake_table_max() {
        let config = RotatingConfig {
            sequence: "red".to_string(),
            base_unit: dec!(100000000000),
            start_units: i64::MAX - 1,
            on_loss_units: i64::MAX,
            ..RotatingConfig::default()
        };
        let strategy = RotatingStrategy::new(&config, limits()).unwrap();

        let state = strategy.advance(&strategy.initial_state(), dec!(-500));
        assert_eq!(state.rotating_units, i64::MAX);
        let wagers = strategy.prepare(&state, &[]);
        assert_eq!(wagers[0].amount, dec!(500));
    }

    #[test]
    fn test_blank_sequence_places_nothing() {
        let strategy = RotatingStrategy::new(&RotatingConfig::default(), limits()).unwrap();
        assert!(strategy.sequence().is_empty());
        assert!(strategy.prepare(&strategy.initial_state(), &[]).is_empty());
    }
}
