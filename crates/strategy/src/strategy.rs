//! Lane Strategy Trait
//!
//! One capability, three variants. The variant is picked once per lane when
//! the runner is built and reused for every spin of every run.

use croupier_core::{
    LaneConfig, LaneState, Money, ProgressionMode, Result, SpinResult, TableLimits, Wager,
};

use crate::chain::ChainStrategy;
use crate::progression::StaticStrategy;
use crate::rotating::RotatingStrategy;

/// Strategy trait - one implementation per progression mode
///
/// Strategies hold configuration only. Progress lives in the [`LaneState`]
/// passed in, so one strategy serves every run of a batch.
pub trait LaneStrategy: Send + Sync {
    fn mode(&self) -> ProgressionMode;

    /// Progress at the start of a run (and after a session reset)
    fn initial_state(&self) -> LaneState {
        LaneState::default()
    }

    /// Wagers for the coming spin
    fn prepare(&self, state: &LaneState, history: &[SpinResult]) -> Vec<Wager>;

    /// Next progress given the lane's resolved profit for the spin
    fn advance(&self, state: &LaneState, profit: Money) -> LaneState;
}

/// Build the strategy for a lane's configured mode
///
/// Rotation sequences are compiled here, so a bad keyword fails before any
/// run starts.
pub fn strategy_for(config: &LaneConfig, limits: TableLimits) -> Result<Box<dyn LaneStrategy>> {
    let progression = &config.progression;
    let strategy: Box<dyn LaneStrategy> = match progression.mode {
        ProgressionMode::Static => Box::new(StaticStrategy::new(
            config.bets.clone(),
            progression.on_win,
            progression.on_loss,
            limits,
        )),
        ProgressionMode::Rotating => {
            Box::new(RotatingStrategy::new(&progression.rotating, limits)?)
        }
        ProgressionMode::Chain => Box::new(ChainStrategy::new(&progression.chain)),
    };
    Ok(strategy)
}
