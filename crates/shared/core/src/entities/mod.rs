mod bet;
mod lane;
mod record;
mod settings;

pub use bet::{Bet, BetId, BetIdAllocator, Wager};
pub use lane::{
    ActionKind, ChainAction, ChainConfig, LaneConfig, LaneState, Layout, ProgressionAction,
    ProgressionConfig, ProgressionMode, RotatingConfig, TriggerBet, TriggerRule,
};
pub use record::StrategyRecord;
pub use settings::{Settings, TableLimits};
