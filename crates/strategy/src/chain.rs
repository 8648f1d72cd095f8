//! Chain Strategy
//!
//! Plays an ordered list of saved layouts, moving between steps on
//! win/loss actions.

use croupier_core::{
    ChainAction, ChainConfig, LaneState, Layout, Money, ProgressionMode, SpinResult, Wager,
};
use rust_decimal::Decimal;

use crate::strategy::LaneStrategy;

#[derive(Debug, Clone)]
pub struct ChainStrategy {
    steps: Vec<Layout>,
    on_win: ChainAction,
    on_loss: ChainAction,
    looping: bool,
}

impl ChainStrategy {
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            steps: config.steps.clone(),
            on_win: config.on_win,
            on_loss: config.on_loss,
            looping: config.looping,
        }
    }

    pub fn steps(&self) -> &[Layout] {
        &self.steps
    }

    /// Current step index; out of range snaps back to the first step
    fn current(&self, state: &LaneState) -> usize {
        if state.chain_index < self.steps.len() {
            state.chain_index
        } else {
            0
        }
    }
}

impl LaneStrategy for ChainStrategy {
    fn mode(&self) -> ProgressionMode {
        ProgressionMode::Chain
    }

    fn prepare(&self, state: &LaneState, _history: &[SpinResult]) -> Vec<Wager> {
        let Some(step) = self.steps.get(self.current(state)) else {
            return Vec::new();
        };
        step.bets
            .iter()
            .filter(|w| w.amount > Decimal::ZERO)
            .cloned()
            .collect()
    }

    fn advance(&self, state: &LaneState, profit: Money) -> LaneState {
        let action = if profit >= Decimal::ZERO {
            self.on_win
        } else {
            self.on_loss
        };
        let index = self.current(state);
        let last = self.steps.len().saturating_sub(1);

        let mut next = *state;
        next.chain_index = match action {
            ChainAction::RestartChain => 0,
            ChainAction::PrevChainStep => index.saturating_sub(1),
            ChainAction::NextChainStep if index < last => index + 1,
            ChainAction::NextChainStep if self.looping => 0,
            ChainAction::NextChainStep => last,
            ChainAction::DoNothing | ChainAction::Unknown => index,
        };
        next
    }
}
