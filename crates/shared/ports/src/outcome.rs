use croupier_core::SpinResult;

/// Port for spin outcomes
///
/// Implementations:
/// - Uniform random draws over the 38 pockets
/// - A fixed, pre-parsed sequence for deterministic test runs
pub trait OutcomeSource: Send {
    /// Next outcome, or `None` once a finite source is exhausted
    fn next_outcome(&mut self) -> Option<SpinResult>;

    /// Outcomes left, if the source is finite
    fn remaining(&self) -> Option<usize> {
        None
    }

    /// Source name for logging
    fn name(&self) -> &str {
        "OutcomeSource"
    }
}
