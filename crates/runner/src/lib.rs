//! Croupier Runner - Roulette Strategy Simulation
//!
//! Orchestrates batches of simulated roulette runs:
//!
//! - **Simulation**: validation, the per-spin loop, funds guardrail, stats
//! - **Control**: pause / resume / step / speed / cancel over channels
//! - **Outcomes**: seeded random wheel or a fixed test sequence
//! - **Events**: coalesced progress stream for an observer
//! - **Store / Config**: in-memory strategy store and JSON config files
//!
//! ## Architecture
//!
//! ```text
//!   SimulationHandle ──ControlCommand──►┌──────────────────────┐
//!          ▲                            │   simulation task    │
//!          └──────watch RunnerState─────│                      │
//!                                       │  OutcomeSource       │
//!                                       │    │ spin            │
//!                                       │    ▼                 │
//!                                       │  Lanes (strategies)  │
//!                                       │    │ bets            │
//!                                       │    ▼                 │
//!                                       │  SpinResolver        │
//!                                       └─────────┬────────────┘
//!                                                 │ SimulationEvent
//!                                                 ▼
//!                                             observer ──► RunAnalyst
//! ```

pub mod config;
pub mod control;
pub mod error;
pub mod events;
pub mod outcome;
pub mod pacing;
pub mod report;
pub mod simulation;
pub mod store;

// Re-export main types
pub use config::{ConfigError, RunnerConfig};
pub use control::{ControlCommand, RunnerState, SimulationHandle};
pub use error::{Result, RunnerError};
pub use events::SimulationEvent;
pub use outcome::{FixedOutcomes, RandomOutcomes};
pub use pacing::{PacingConfig, Speed};
pub use report::{BatchReport, RunEnd, RunRecord};
pub use simulation::SimulationRunner;
pub use store::InMemoryStore;
