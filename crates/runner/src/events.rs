//! Simulation events streamed to an observer
//!
//! Steps are coalesced into `Progress` batches. The last step of a run is
//! always sent on its own as `FinalStep`. A cancelled run whose newest step
//! already went out in a batch repeats that step as `FinalStep`.

use croupier_core::{BatchStats, Money, RunOutcome, SimulationStep};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::report::RunEnd;

#[derive(Debug, Clone)]
pub enum SimulationEvent {
    RunStarted {
        run: u32,
        starting_bankroll: Money,
    },
    Progress {
        run: u32,
        steps: Vec<SimulationStep>,
    },
    FinalStep {
        run: u32,
        step: SimulationStep,
    },
    RunFinished {
        run: u32,
        outcome: RunOutcome,
        end: RunEnd,
    },
    BatchFinished {
        batch_id: Uuid,
        stats: BatchStats,
        cancelled: bool,
    },
    /// Non-fatal note, e.g. a degraded fixed outcome
    Diagnostic(String),
    /// Text from the analysis collaborator
    Analysis { batch_id: Uuid, text: String },
}

impl SimulationEvent {
    /// Steps carried by this event
    pub fn steps(&self) -> &[SimulationStep] {
        match self {
            SimulationEvent::Progress { steps, .. } => steps,
            SimulationEvent::FinalStep { step, .. } => std::slice::from_ref(step),
            _ => &[],
        }
    }
}

/// Coalesces steps and forwards events to the optional subscriber
#[derive(Debug)]
pub(crate) struct EventPublisher {
    tx: Option<mpsc::UnboundedSender<SimulationEvent>>,
    batch: usize,
    run: u32,
    pending: Vec<SimulationStep>,
    /// Newest step of this run already sent in a progress batch
    last_sent: Option<SimulationStep>,
}

impl EventPublisher {
    pub fn new(tx: Option<mpsc::UnboundedSender<SimulationEvent>>, batch: usize) -> Self {
        Self {
            tx,
            batch: batch.max(1),
            run: 0,
            pending: Vec::new(),
            last_sent: None,
        }
    }

    pub fn sender(&self) -> Option<mpsc::UnboundedSender<SimulationEvent>> {
        self.tx.clone()
    }

    pub fn send(&self, event: SimulationEvent) {
        if let Some(tx) = &self.tx {
            // Ignore send error (a dropped subscriber is ok)
            let _ = tx.send(event);
        }
    }

    pub fn begin_run(&mut self, run: u32, starting_bankroll: Money) {
        self.pending.clear();
        self.last_sent = None;
        self.run = run;
        self.send(SimulationEvent::RunStarted {
            run,
            starting_bankroll,
        });
    }

    /// Publish a committed step; `last` marks the run's final step
    pub fn step(&mut self, step: SimulationStep, last: bool) {
        if last {
            self.flush();
            self.send(SimulationEvent::FinalStep {
                run: self.run,
                step,
            });
            return;
        }
        self.pending.push(step);
        if self.pending.len() >= self.batch {
            self.flush();
        }
    }

    /// Send whatever is pending as one progress batch
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let steps = std::mem::take(&mut self.pending);
        self.last_sent = steps.last().cloned();
        self.send(SimulationEvent::Progress {
            run: self.run,
            steps,
        });
    }

    /// Close a cancelled run: its newest committed step goes out on its own
    pub fn close_cancelled(&mut self) {
        let last = match self.pending.pop() {
            Some(step) => {
                self.flush();
                step
            }
            None => match self.last_sent.take() {
                Some(step) => step,
                None => return,
            },
        };
        self.last_sent = None;
        self.send(SimulationEvent::FinalStep {
            run: self.run,
            step: last,
        });
    }
}
