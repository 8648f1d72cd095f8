//! Lane
//!
//! Binds a lane's configuration to its strategy and triggers. The lane is
//! immutable during a run; all progress is carried in the caller's
//! [`LaneState`].

use croupier_core::{
    Bet, BetIdAllocator, LaneConfig, LaneState, Money, ProgressionMode, Result, SpinResult,
    TableLimits,
};
use log::debug;
use rust_decimal::Decimal;

use crate::strategy::{LaneStrategy, strategy_for};
use crate::trigger::TriggerEvaluator;

/// Bets a lane puts down for one spin
#[derive(Debug, Clone, Default)]
pub struct BetTicket {
    pub bets: Vec<Bet>,
    /// Sum of all stakes on the ticket
    pub wager: Money,
    /// Descriptions of the triggers that fired
    pub fired: Vec<String>,
    /// Progress was reset by the session-profit rule before preparing
    pub reset: bool,
}

impl BetTicket {
    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }
}

pub struct Lane {
    config: LaneConfig,
    strategy: Box<dyn LaneStrategy>,
    triggers: TriggerEvaluator,
}

impl std::fmt::Debug for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lane")
            .field("id", &self.config.id)
            .field("mode", &self.strategy.mode())
            .field("triggers", &self.triggers)
            .finish()
    }
}

impl Lane {
    pub fn new(config: LaneConfig, limits: TableLimits) -> Result<Self> {
        let strategy = strategy_for(&config, limits)?;
        let triggers = TriggerEvaluator::new(&config.triggers);
        Ok(Self {
            config,
            strategy,
            triggers,
        })
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &LaneConfig {
        &self.config
    }

    pub fn mode(&self) -> ProgressionMode {
        self.strategy.mode()
    }

    /// Progress for a new run
    pub fn fresh_state(&self) -> LaneState {
        self.strategy.initial_state()
    }

    fn session_target_reached(&self, state: &LaneState) -> bool {
        let progression = &self.config.progression;
        progression.reset_on_session_profit
            && state.session_profit >= progression.session_profit_target
    }

    /// Prepare this lane's bets for the coming spin.
    ///
    /// The session-profit reset is applied to `state` first, then the
    /// strategy's bets and any fired trigger bets go on the ticket.
    pub fn prepare(
        &self,
        state: &mut LaneState,
        history: &[SpinResult],
        ids: &mut BetIdAllocator,
    ) -> BetTicket {
        let mut ticket = BetTicket::default();

        if self.session_target_reached(state) {
            let fresh = self.fresh_state();
            if *state != fresh {
                debug!(
                    "[Lane {}] Session profit {} reached target, resetting progress",
                    self.config.id, state.session_profit
                );
                *state = fresh;
                ticket.reset = true;
            }
        }

        for wager in self.strategy.prepare(state, history) {
            ticket.bets.push(Bet::place(ids, &wager));
        }

        for fired in self.triggers.evaluate(history) {
            if fired.wager.amount <= Decimal::ZERO {
                continue;
            }
            debug!("[Lane {}] Trigger fired: {}", self.config.id, fired.description);
            ticket.bets.push(Bet::place(ids, &fired.wager));
            ticket.fired.push(fired.description);
        }

        ticket.wager = ticket.bets.iter().map(|b| b.amount).sum();
        ticket
    }

    /// Progress after the spin resolved with `profit` for this lane.
    ///
    /// A lane that placed nothing keeps its progress.
    pub fn settle(&self, state: &LaneState, ticket: &BetTicket, profit: Money) -> LaneState {
        if ticket.is_empty() {
            return *state;
        }
        let mut next = self.strategy.advance(state, profit);
        next.session_profit = state.session_profit + profit;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_core::{ActionKind, Placement, ProgressionAction, TriggerBet, TriggerRule, Wager};
    use rust_decimal_macros::dec;

    fn limits() -> TableLimits {
        TableLimits {
            min: dec!(1),
            max: dec!(500),
        }
    }

    fn martingale_lane() -> LaneConfig {
        let mut config = LaneConfig::new("red-lane", vec![Wager::new(Placement::red(), dec!(10))]);
        config.progression.on_win = ProgressionAction::new(ActionKind::Reset);
        config.progression.on_loss = ProgressionAction::with_value(ActionKind::Multiply, dec!(2));
        config
    }

    #[test]
    fn test_bet_ids_are_sequential_within_a_spin() {
        let config = martingale_lane().with_trigger(TriggerBet {
            label: String::new(),
            target: Placement::black(),
            rule: TriggerRule::HitStreak,
            threshold: 0,
            bet: Wager::new(Placement::straight(0).unwrap(), dec!(1)),
            enabled: true,
        });
        let lane = Lane::new(config, limits()).unwrap();
        let mut state = lane.fresh_state();
        let mut ids = BetIdAllocator::new(2, 5);

        let ticket = lane.prepare(&mut state, &[], &mut ids);
        let ids: Vec<String> = ticket.bets.iter().map(|b| b.id.to_string()).collect();
        assert_eq!(ids, vec!["r2.s5.b0", "r2.s5.b1"]);
        assert_eq!(ticket.wager, dec!(11));
        assert_eq!(ticket.fired.len(), 1);
    }

    #[test]
    fn test_settle_tracks_session_profit() {
        let lane = Lane::new(martingale_lane(), limits()).unwrap();
        let mut state = lane.fresh_state();
        let mut ids = BetIdAllocator::new(0, 0);

        let ticket = lane.prepare(&mut state, &[], &mut ids);
        let state = lane.settle(&state, &ticket, dec!(-10));
        assert_eq!(state.multiplier, dec!(2));
        assert_eq!(state.session_profit, dec!(-10));
    }

    #[test]
    fn test_empty_ticket_keeps_progress() {
        let lane = Lane::new(LaneConfig::new("idle", Vec::new()), limits()).unwrap();
        let mut state = lane.fresh_state();
        state.multiplier = dec!(4);
        let mut ids = BetIdAllocator::new(0, 0);

        let ticket = lane.prepare(&mut state, &[], &mut ids);
        assert!(ticket.is_empty());
        assert_eq!(ticket.wager, Decimal::ZERO);
        assert_eq!(lane.settle(&state, &ticket, Decimal::ZERO), state);
    }

    #[test]
    fn test_session_reset_happens_before_preparing() {
        let mut config = martingale_lane();
        config.progression.reset_on_session_profit = true;
        config.progression.session_profit_target = dec!(25);
        let lane = Lane::new(config, limits()).unwrap();

        let mut state = lane.fresh_state();
        state.multiplier = dec!(4);
        state.session_profit = dec!(30);
        let mut ids = BetIdAllocator::new(0, 3);

        let ticket = lane.prepare(&mut state, &[], &mut ids);
        assert!(ticket.reset);
        assert_eq!(state, lane.fresh_state());
        assert_eq!(ticket.wager, dec!(10));
    }

    #[test]
    fn test_no_reset_below_target() {
        let mut config = martingale_lane();
        config.progression.reset_on_session_profit = true;
        config.progression.session_profit_target = dec!(25);
        let lane = Lane::new(config, limits()).unwrap();

        let mut state = lane.fresh_state();
        state.multiplier = dec!(2);
        state.session_profit = dec!(10);
        let mut ids = BetIdAllocator::new(0, 1);

        let ticket = lane.prepare(&mut state, &[], &mut ids);
        assert!(!ticket.reset);
        assert_eq!(ticket.wager, dec!(20));
    }
}
