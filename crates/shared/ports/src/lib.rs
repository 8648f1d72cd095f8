//! Croupier Ports
//!
//! Port definitions (traits) for the croupier simulation engine.
//! These define the boundaries between the engine and its collaborators:
//! where outcomes come from, where strategies are persisted, and who turns
//! audit trails into prose.

mod analysis;
mod error;
mod outcome;
mod store;

pub use analysis::{RunAnalysisRequest, RunAnalyst};
pub use error::{AnalysisError, StoreError, StoreResult};
pub use outcome::OutcomeSource;
pub use store::StrategyStore;
