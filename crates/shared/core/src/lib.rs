//! Croupier Core Domain
//!
//! Pure domain types for the croupier roulette simulation engine.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! - **table**: pockets, spin outcomes, placements, rotation sequences, payouts
//! - **entities**: bets, lane configuration, settings, persistence records
//! - **audit**: per-spin audit steps and batch statistics

pub mod audit;
pub mod entities;
pub mod error;
pub mod table;
pub mod values;

// Re-export commonly used types at crate root
pub use audit::{
    BatchStats, EvaluatedBet, LaneSnapshot, RunOutcome, RunResult, SimulationStep, StepKind,
    aggregate,
};
pub use entities::{
    ActionKind, Bet, BetId, BetIdAllocator, ChainAction, ChainConfig, LaneConfig, LaneState,
    Layout, ProgressionAction, ProgressionConfig, ProgressionMode, RotatingConfig, Settings,
    StrategyRecord, TableLimits, TriggerBet, TriggerRule, Wager,
};
pub use error::{Result, TableError};
pub use table::{
    BetCategory, BetResolution, LaneResolution, ParsedOutcome, PayoutTable, Placement,
    SpinResolver, SpinResult, parse_outcome, parse_outcome_sequence, parse_sequence,
};
pub use values::{Color, DOUBLE_ZERO, Money, RED_NUMBERS};
