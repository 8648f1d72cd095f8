use async_trait::async_trait;
use croupier_core::{BatchStats, Money, SimulationStep};

use crate::error::AnalysisError;

/// Input for a single-run narrative
#[derive(Debug, Clone)]
pub struct RunAnalysisRequest {
    pub starting_bankroll: Money,
    pub final_bankroll: Money,
    pub spins: u32,
    pub steps: Vec<SimulationStep>,
}

/// Port for the text-analysis collaborator
///
/// Both calls return opaque text the engine forwards without interpreting.
/// The engine only calls them after batch stats are final and never waits
/// on the answer.
#[async_trait]
pub trait RunAnalyst: Send + Sync {
    async fn analyze_run(&self, request: RunAnalysisRequest) -> Result<String, AnalysisError>;

    async fn analyze_batch(&self, stats: &BatchStats) -> Result<String, AnalysisError>;
}
