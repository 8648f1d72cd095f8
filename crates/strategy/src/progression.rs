//! Static Progression
//!
//! Plays the lane's base bets scaled by a multiplier. After each spin the
//! configured win or loss action moves the multiplier:
//! - RESET back to 1
//! - MULTIPLY / ADD_UNITS / SUBTRACT_UNITS by the action's value
//! - FIBONACCI walks an index through [`FIBONACCI`]
//!
//! The multiplier is floored and never drops below 1.

use croupier_core::{
    ActionKind, LaneState, Money, ProgressionAction, ProgressionMode, SpinResult, TableLimits,
    Wager,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use crate::strategy::LaneStrategy;

/// Multipliers used by the FIBONACCI action
pub const FIBONACCI: [u32; 16] = [
    1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987,
];

/// Base bets times a stake multiplier
#[derive(Debug, Clone)]
pub struct StaticStrategy {
    bets: Vec<Wager>,
    on_win: ProgressionAction,
    on_loss: ProgressionAction,
    limits: TableLimits,
}

impl StaticStrategy {
    pub fn new(
        bets: Vec<Wager>,
        on_win: ProgressionAction,
        on_loss: ProgressionAction,
        limits: TableLimits,
    ) -> Self {
        Self {
            bets,
            on_win,
            on_loss,
            limits,
        }
    }

    fn total_base(&self) -> Money {
        self.bets.iter().map(|w| w.amount).sum()
    }

    /// Multiplier actually applied this spin, capped at the table maximum
    fn effective_multiplier(&self, multiplier: Decimal) -> Decimal {
        let total = self.total_base();
        if total <= Decimal::ZERO {
            return multiplier;
        }
        match total.checked_mul(multiplier) {
            Some(wager) if wager <= self.limits.max => multiplier,
            _ => self.limits.max / total,
        }
    }
}

/// Apply one progression action to a state
fn apply_action(state: &LaneState, action: ProgressionAction, win: bool) -> LaneState {
    let mut next = *state;
    match action.kind {
        ActionKind::Reset => {
            next.multiplier = Decimal::ONE;
            next.progression_index = 0;
        }
        ActionKind::Multiply => {
            let factor = action.value.unwrap_or(dec!(2));
            next.multiplier = next.multiplier.checked_mul(factor).unwrap_or(Decimal::MAX);
        }
        ActionKind::AddUnits => {
            let units = action.value.unwrap_or(Decimal::ONE);
            next.multiplier = next.multiplier.checked_add(units).unwrap_or(Decimal::MAX);
        }
        ActionKind::SubtractUnits => {
            let units = action.value.unwrap_or(Decimal::ONE);
            next.multiplier = (next.multiplier - units).max(Decimal::ONE);
        }
        ActionKind::Fibonacci => {
            let default_step = if win { dec!(-2) } else { Decimal::ONE };
            let step = action
                .value
                .unwrap_or(default_step)
                .trunc()
                .to_i64()
                .unwrap_or(0);
            let last = (FIBONACCI.len() - 1) as i64;
            let index = (next.progression_index as i64).saturating_add(step).clamp(0, last);
            next.progression_index = index as usize;
            next.multiplier = Decimal::from(FIBONACCI[next.progression_index]);
        }
        ActionKind::DoNothing | ActionKind::Unknown => {}
    }
    next.multiplier = next.multiplier.floor().max(Decimal::ONE);
    next
}

impl LaneStrategy for StaticStrategy {
    fn mode(&self) -> ProgressionMode {
        ProgressionMode::Static
    }

    fn prepare(&self, state: &LaneState, _history: &[SpinResult]) -> Vec<Wager> {
        let multiplier = self.effective_multiplier(state.multiplier.max(Decimal::ONE));
        self.bets
            .iter()
            .filter_map(|base| {
                let amount = (base.amount * multiplier).floor();
                (amount > Decimal::ZERO).then(|| Wager::new(base.placement.clone(), amount))
            })
            .collect()
    }

    fn advance(&self, state: &LaneState, profit: Money) -> LaneState {
        let win = profit >= Decimal::ZERO;
        let action = if win { self.on_win } else { self.on_loss };
        apply_action(state, action, win)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_core::Placement;

    fn limits(max: Decimal) -> TableLimits {
        TableLimits { min: dec!(1), max }
    }

    fn martingale() -> StaticStrategy {
        StaticStrategy::new(
            vec![Wager::new(Placement::red(), dec!(10))],
            ProgressionAction::new(ActionKind::Reset),
            ProgressionAction::with_value(ActionKind::Multiply, dec!(2)),
            limits(dec!(500)),
        )
    }

    #[test]
    fn test_multiply_on_loss_reset_on_win() {
        let strategy = martingale();
        let mut state = strategy.initial_state();

        let mut seen = Vec::new();
        for profit in [dec!(-10), dec!(-20), dec!(40)] {
            state = strategy.advance(&state, profit);
            seen.push(state.multiplier);
        }
        assert_eq!(seen, vec![dec!(2), dec!(4), dec!(1)]);
    }

    #[test]
    fn test_push_counts_as_win() {
        let strategy = martingale();
        let mut state = strategy.initial_state();
        state.multiplier = dec!(8);

        let next = strategy.advance(&state, Decimal::ZERO);
        assert_eq!(next.multiplier, Decimal::ONE);
    }

    #[test]
    fn test_stakes_scale_with_multiplier() {
        let strategy = StaticStrategy::new(
            vec![
                Wager::new(Placement::red(), dec!(5)),
                Wager::new(Placement::dozen(2).unwrap(), dec!(3)),
            ],
            ProgressionAction::default(),
            ProgressionAction::default(),
            limits(dec!(500)),
        );
        let mut state = strategy.initial_state();
        state.multiplier = dec!(3);

        let amounts: Vec<Money> = strategy.prepare(&state, &[]).iter().map(|w| w.amount).collect();
        assert_eq!(amounts, vec![dec!(15), dec!(9)]);
    }

    #[test]
    fn test_multiplier_capped_by_table_max() {
        let strategy = StaticStrategy::new(
            vec![
                Wager::new(Placement::red(), dec!(10)),
                Wager::new(Placement::odd(), dec!(10)),
            ],
            ProgressionAction::default(),
            ProgressionAction::default(),
            limits(dec!(100)),
        );
        let mut state = strategy.initial_state();
        state.multiplier = dec!(64);

        let wagers = strategy.prepare(&state, &[]);
        let total: Money = wagers.iter().map(|w| w.amount).sum();
        assert_eq!(total, dec!(100));
        assert!(wagers.iter().all(|w| w.amount == dec!(50)));
    }

    #[test]
    fn test_zero_stakes_are_dropped() {
        let strategy = StaticStrategy::new(
            vec![
                Wager::new(Placement::red(), dec!(0.5)),
                Wager::new(Placement::black(), dec!(2)),
            ],
            ProgressionAction::default(),
            ProgressionAction::default(),
            limits(dec!(500)),
        );

        let wagers = strategy.prepare(&strategy.initial_state(), &[]);
        assert_eq!(wagers.len(), 1);
        assert_eq!(wagers[0].placement, Placement::black());
    }

    #[test]
    fn test_fibonacci_walk() {
        let strategy = StaticStrategy::new(
            vec![Wager::new(Placement::red(), dec!(1))],
            ProgressionAction::new(ActionKind::Fibonacci),
            ProgressionAction::new(ActionKind::Fibonacci),
            limits(dec!(5000)),
        );
        let mut state = strategy.initial_state();

        // Four losses climb 1 -> 2 -> 3 -> 5
        let mut seen = Vec::new();
        for _ in 0..4 {
            state = strategy.advance(&state, dec!(-1));
            seen.push(state.multiplier);
        }
        assert_eq!(seen, vec![dec!(1), dec!(2), dec!(3), dec!(5)]);
        assert_eq!(state.progression_index, 4);

        // A win steps back two
        state = strategy.advance(&state, dec!(5));
        assert_eq!(state.progression_index, 2);
        assert_eq!(state.multiplier, dec!(2));

        // And never below the start of the table
        state = strategy.advance(&state, dec!(5));
        state = strategy.advance(&state, dec!(5));
        assert_eq!(state.progression_index, 0);
        assert_eq!(state.multiplier, dec!(1));
    }

    #[test]
    fn test_fibonacci_clamps_at_table_end() {
        let state = LaneState {
            progression_index: FIBONACCI.len() - 1,
            ..LaneState::default()
        };
        let next = apply_action(
            &state,
            ProgressionAction::with_value(ActionKind::Fibonacci, dec!(3)),
            false,
        );
        assert_eq!(next.progression_index, FIBONACCI.len() - 1);
        assert_eq!(next.multiplier, dec!(987));
    }

    #[test]
    fn test_subtract_and_fractional_values_floor_to_one() {
        let state = LaneState {
            multiplier: dec!(3),
            ..LaneState::default()
        };
        let next = apply_action(
            &state,
            ProgressionAction::with_value(ActionKind::SubtractUnits, dec!(5)),
            true,
        );
        assert_eq!(next.multiplier, Decimal::ONE);

        let next = apply_action(
            &state,
            ProgressionAction::with_value(ActionKind::Multiply, dec!(0.1)),
            false,
        );
        assert_eq!(next.multiplier, Decimal::ONE);

        let next = apply_action(
            &state,
            ProgressionAction::with_value(ActionKind::AddUnits, dec!(1.5)),
            false,
        );
        assert_eq!(next.multiplier, dec!(4));
    }

    #[test]
    fn test_unknown_action_is_a_no_op() {
        let state = LaneState {
            multiplier: dec!(6),
            progression_index: 3,
            ..LaneState::default()
        };
        assert_eq!(
            apply_action(&state, ProgressionAction::new(ActionKind::Unknown), false),
            state
        );
    }
}
