//! Outcome sources - random wheel and fixed test sequences

use croupier_core::{DOUBLE_ZERO, ParsedOutcome, SpinResult};
use croupier_ports::OutcomeSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniform draws over the 38 pockets of an American wheel
pub struct RandomOutcomes {
    rng: StdRng,
}

impl RandomOutcomes {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create with a specific seed for reproducible batches
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl Default for RandomOutcomes {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeSource for RandomOutcomes {
    fn next_outcome(&mut self) -> Option<SpinResult> {
        let value: i8 = self.rng.gen_range(DOUBLE_ZERO..=36);
        SpinResult::from_value(value)
    }

    fn name(&self) -> &str {
        "RandomOutcomes"
    }
}

/// Pre-parsed outcomes played in order; runs out when the list does
#[derive(Debug, Clone)]
pub struct FixedOutcomes {
    queue: VecDeque<SpinResult>,
}

impl FixedOutcomes {
    pub fn new(outcomes: impl IntoIterator<Item = SpinResult>) -> Self {
        Self {
            queue: outcomes.into_iter().collect(),
        }
    }

    pub fn from_parsed(parsed: &[ParsedOutcome]) -> Self {
        Self::new(parsed.iter().map(|p| p.result.clone()))
    }
}

impl OutcomeSource for FixedOutcomes {
    fn next_outcome(&mut self) -> Option<SpinResult> {
        self.queue.pop_front()
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.queue.len())
    }

    fn name(&self) -> &str {
        "FixedOutcomes"
    }
}
