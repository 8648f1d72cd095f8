//! Control surface - message passing between callers and the simulation task
//!
//! Callers hold a [`SimulationHandle`] and send [`ControlCommand`]s over an
//! mpsc channel. The task publishes its [`RunnerState`] on a watch channel
//! and consults the [`Controller`] gate before every spin.

use log::{debug, info};
use tokio::sync::{mpsc, watch};

use crate::error::{Result, RunnerError};
use crate::events::EventPublisher;
use crate::pacing::{PacingConfig, Speed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Pause,
    Resume,
    /// Release one spin (manual-step speed only)
    Step,
    SetSpeed(Speed),
    Cancel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RunnerState {
    #[default]
    Idle,
    Running,
    Paused,
    Stopping,
}

/// Caller-side handle to a started batch
#[derive(Debug, Clone)]
pub struct SimulationHandle {
    control_tx: mpsc::UnboundedSender<ControlCommand>,
    state_rx: watch::Receiver<RunnerState>,
}

impl SimulationHandle {
    pub(crate) fn new(
        control_tx: mpsc::UnboundedSender<ControlCommand>,
        state_rx: watch::Receiver<RunnerState>,
    ) -> Self {
        Self {
            control_tx,
            state_rx,
        }
    }

    pub fn send(&self, command: ControlCommand) -> Result<()> {
        self.control_tx
            .send(command)
            .map_err(|_| RunnerError::ChannelClosed)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(ControlCommand::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.send(ControlCommand::Resume)
    }

    pub fn step(&self) -> Result<()> {
        self.send(ControlCommand::Step)
    }

    pub fn set_speed(&self, speed: Speed) -> Result<()> {
        self.send(ControlCommand::SetSpeed(speed))
    }

    pub fn cancel(&self) -> Result<()> {
        self.send(ControlCommand::Cancel)
    }

    /// Current runner state
    pub fn state(&self) -> RunnerState {
        *self.state_rx.borrow()
    }

    /// Subscribe to state changes
    pub fn watch_state(&self) -> watch::Receiver<RunnerState> {
        self.state_rx.clone()
    }

    /// Wait until the runner reports `state`
    pub async fn wait_for(&self, state: RunnerState) -> Result<()> {
        let mut rx = self.state_rx.clone();
        rx.wait_for(|current| *current == state)
            .await
            .map(|_| ())
            .map_err(|_| RunnerError::ChannelClosed)
    }
}

/// Task-side end of the control channel
#[derive(Debug)]
pub(crate) struct Controller {
    control_rx: mpsc::UnboundedReceiver<ControlCommand>,
    /// Held for inline runs so the channel never reports closed
    _keepalive: Option<mpsc::UnboundedSender<ControlCommand>>,
    state_tx: watch::Sender<RunnerState>,
    pacing: PacingConfig,
    paused: bool,
    cancelled: bool,
    pending_steps: u32,
    since_yield: u32,
}

impl Controller {
    /// Controller plus the handle that drives it
    pub fn channel(pacing: PacingConfig) -> (Self, SimulationHandle) {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(RunnerState::Running);
        let controller = Self::build(control_rx, None, state_tx, pacing);
        (controller, SimulationHandle::new(control_tx, state_rx))
    }

    /// Controller with no external handle
    pub fn detached(pacing: PacingConfig) -> Self {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(RunnerState::Running);
        Self::build(control_rx, Some(control_tx), state_tx, pacing)
    }

    fn build(
        control_rx: mpsc::UnboundedReceiver<ControlCommand>,
        keepalive: Option<mpsc::UnboundedSender<ControlCommand>>,
        state_tx: watch::Sender<RunnerState>,
        pacing: PacingConfig,
    ) -> Self {
        Self {
            control_rx,
            _keepalive: keepalive,
            state_tx,
            pacing,
            paused: false,
            cancelled: false,
            pending_steps: 0,
            since_yield: 0,
        }
    }

    pub fn speed(&self) -> Speed {
        self.pacing.speed
    }

    fn publish(&self, state: RunnerState) {
        self.state_tx.send_replace(state);
    }

    fn apply(&mut self, command: ControlCommand) {
        debug!("[Control] {:?}", command);
        match command {
            ControlCommand::Pause => {
                if !self.cancelled {
                    self.paused = true;
                    self.publish(RunnerState::Paused);
                    info!("[Control] Paused");
                }
            }
            ControlCommand::Resume => {
                if !self.cancelled && self.paused {
                    self.paused = false;
                    self.publish(RunnerState::Running);
                    info!("[Control] Resumed");
                }
            }
            ControlCommand::Step => {
                if self.pacing.speed == Speed::Step {
                    self.pending_steps += 1;
                }
            }
            ControlCommand::SetSpeed(speed) => {
                if speed != Speed::Step {
                    self.pending_steps = 0;
                }
                self.pacing.speed = speed;
                info!("[Control] Speed set to {}", speed);
            }
            ControlCommand::Cancel => self.mark_cancelled(),
        }
    }

    fn mark_cancelled(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.paused = false;
            self.publish(RunnerState::Stopping);
            info!("[Control] Cancel requested");
        }
    }

    /// Apply every command already queued, without waiting
    fn drain(&mut self) {
        while let Ok(command) = self.control_rx.try_recv() {
            self.apply(command);
        }
    }

    /// Block until the next command. Losing every handle cancels.
    async fn wait_command(&mut self) {
        match self.control_rx.recv().await {
            Some(command) => self.apply(command),
            None => {
                info!("[Control] All handles dropped while waiting");
                self.mark_cancelled();
            }
        }
    }

    /// Non-blocking cancellation check
    pub fn is_cancelled(&mut self) -> bool {
        self.drain();
        self.cancelled
    }

    /// Suspension point before every spin.
    ///
    /// Returns `false` once cancellation is observed. Pending progress is
    /// flushed before blocking so the observer sees every committed step.
    pub async fn gate(&mut self, events: &mut EventPublisher) -> bool {
        self.drain();
        loop {
            if self.cancelled {
                return false;
            }
            if self.paused {
                events.flush();
                self.wait_command().await;
                continue;
            }
            match self.pacing.speed {
                Speed::Step => {
                    if self.pending_steps > 0 {
                        self.pending_steps -= 1;
                        return true;
                    }
                    events.flush();
                    self.wait_command().await;
                }
                Speed::Moderate => {
                    events.flush();
                    let delay = tokio::time::sleep(self.pacing.moderate_delay());
                    tokio::select! {
                        _ = delay => return true,
                        command = self.control_rx.recv() => match command {
                            Some(command) => self.apply(command),
                            None => self.mark_cancelled(),
                        },
                    }
                }
                Speed::Fast => {
                    self.since_yield += 1;
                    if self.pacing.fast_yield_every > 0
                        && self.since_yield >= self.pacing.fast_yield_every
                    {
                        self.since_yield = 0;
                        tokio::task::yield_now().await;
                    }
                    return true;
                }
            }
        }
    }

    /// Batch over: back to Idle
    pub fn finish(&self) {
        self.publish(RunnerState::Idle);
    }
}
