//! Audit trail records and batch statistics

mod stats;
mod step;

pub use stats::{BatchStats, RunOutcome, RunResult, aggregate};
pub use step::{EvaluatedBet, LaneSnapshot, SimulationStep, StepKind};
