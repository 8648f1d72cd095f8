//! Simulation - batch orchestration
//!
//! Ties together all components:
//! - Lanes and their strategies
//! - Outcome source (random wheel or fixed test sequence)
//! - Spin resolution and the funds guardrail
//! - Control gate (pause/resume/step/speed/cancel)
//! - Event stream, batch statistics and analysis hand-off
//!
//! Spins and runs execute strictly one after another on a single task, and
//! lanes are processed in declared order.

use chrono::Utc;
use croupier_core::{
    BetIdAllocator, EvaluatedBet, LaneConfig, LaneSnapshot, LaneState, Money, PayoutTable,
    RunOutcome, RunResult, Settings, SimulationStep, SpinResolver, SpinResult, StepKind,
    StrategyRecord, aggregate, parse_outcome_sequence,
};
use croupier_ports::{AnalysisError, OutcomeSource, RunAnalysisRequest, RunAnalyst};
use croupier_strategy::{BetTicket, Lane};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::control::{Controller, SimulationHandle};
use crate::error::{Result, RunnerError};
use crate::events::{EventPublisher, SimulationEvent};
use crate::outcome::{FixedOutcomes, RandomOutcomes};
use crate::pacing::{PacingConfig, Speed};
use crate::report::{BatchReport, RunEnd, RunRecord};

/// Builds and launches batches
pub struct SimulationRunner {
    lanes: Vec<LaneConfig>,
    settings: Settings,
    payouts: PayoutTable,
    pacing: PacingConfig,
    seed: Option<u64>,
    analyst: Option<Arc<dyn RunAnalyst>>,
    events_tx: Option<mpsc::UnboundedSender<SimulationEvent>>,
}

impl SimulationRunner {
    pub fn new(lanes: Vec<LaneConfig>, settings: Settings) -> Self {
        Self {
            lanes,
            settings,
            payouts: PayoutTable::default(),
            pacing: PacingConfig::default(),
            seed: None,
            analyst: None,
            events_tx: None,
        }
    }

    /// Runner for a record handed back by the persistence collaborator
    pub fn from_record(record: StrategyRecord) -> Self {
        Self::new(record.lanes, record.settings)
    }

    pub fn from_config(config: RunnerConfig) -> Self {
        let runner = Self::from_record(config.record).with_pacing(config.pacing);
        match config.seed {
            Some(seed) => runner.with_seed(seed),
            None => runner,
        }
    }

    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Seed the random outcome source for reproducible batches
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_payout_table(mut self, payouts: PayoutTable) -> Self {
        self.payouts = payouts;
        self
    }

    pub fn with_analyst(mut self, analyst: Arc<dyn RunAnalyst>) -> Self {
        self.analyst = Some(analyst);
        self
    }

    /// Subscribe to simulation events (replaces any earlier subscriber)
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SimulationEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events_tx = Some(tx);
        rx
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run a whole batch on the current task.
    ///
    /// There is no control handle here, so manual-step pacing runs as fast.
    pub async fn run(self) -> Result<BatchReport> {
        let mut batch = self.validate()?;
        if batch.pacing.speed == Speed::Step {
            warn!("[Runner] Step pacing needs a control handle, running fast instead");
            batch.pacing.speed = Speed::Fast;
        }
        let controller = Controller::detached(batch.pacing.clone());
        Ok(batch.execute(controller).await)
    }

    /// Validate and spawn the batch on the runtime.
    ///
    /// Nothing is spawned when validation fails.
    pub fn start(self) -> Result<(SimulationHandle, JoinHandle<BatchReport>)> {
        let batch = self.validate()?;
        let (controller, handle) = Controller::channel(batch.pacing.clone());
        let task = tokio::spawn(batch.execute(controller));
        Ok((handle, task))
    }

    fn validate(self) -> Result<Batch> {
        self.check().inspect_err(|e| warn!("[Runner] Not starting: {}", e))
    }

    fn check(self) -> Result<Batch> {
        self.settings.validate()?;

        let enabled: Vec<&LaneConfig> = self.lanes.iter().filter(|l| l.enabled).collect();
        if enabled.is_empty() {
            return Err(RunnerError::Configuration(
                "no enabled lanes".to_string(),
            ));
        }
        if !enabled.iter().any(|l| l.has_any_bets()) {
            return Err(RunnerError::Configuration(
                "every enabled lane is empty (no bets, chain steps, rotation or triggers)"
                    .to_string(),
            ));
        }

        let limits = self.settings.limits();
        let lanes = enabled
            .into_iter()
            .map(|config| Lane::new(config.clone(), limits))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut diagnostics = Vec::new();
        let fixed = match self.settings.fixed_sequence() {
            Some(text) => {
                let parsed = parse_outcome_sequence(text, self.settings.strict_outcomes)?;
                if parsed.is_empty() {
                    return Err(RunnerError::Configuration(
                        "fixed outcome sequence contains no outcomes".to_string(),
                    ));
                }
                diagnostics.extend(parsed.iter().filter_map(|p| p.diagnostic.clone()));
                Some(parsed.into_iter().map(|p| p.result).collect())
            }
            None => None,
        };

        Ok(Batch {
            lanes,
            settings: self.settings,
            resolver: SpinResolver::new(self.payouts),
            pacing: self.pacing,
            seed: self.seed,
            analyst: self.analyst,
            events_tx: self.events_tx,
            fixed,
            diagnostics,
        })
    }
}

/// Per-run progress of one lane
#[derive(Debug, Clone, Copy)]
struct RuntimeLane {
    state: LaneState,
    balance: Money,
}

impl RuntimeLane {
    fn new(lane: &Lane) -> Self {
        Self {
            state: lane.fresh_state(),
            balance: Decimal::ZERO,
        }
    }
}

/// A validated batch, ready to execute
struct Batch {
    lanes: Vec<Lane>,
    settings: Settings,
    resolver: SpinResolver,
    pacing: PacingConfig,
    seed: Option<u64>,
    analyst: Option<Arc<dyn RunAnalyst>>,
    events_tx: Option<mpsc::UnboundedSender<SimulationEvent>>,
    /// Test mode outcomes
    fixed: Option<Vec<SpinResult>>,
    diagnostics: Vec<String>,
}

impl Batch {
    async fn execute(mut self, mut control: Controller) -> BatchReport {
        let batch_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut events = EventPublisher::new(self.events_tx.take(), self.pacing.progress_batch);

        // A fixed sequence means exactly one run, one spin per outcome
        let (run_count, spin_limit) = match &self.fixed {
            Some(outcomes) => (1, u32::try_from(outcomes.len()).unwrap_or(u32::MAX)),
            None => (
                self.settings.number_of_simulations,
                self.settings.spins_per_simulation,
            ),
        };

        info!(
            "[Runner] Batch {} starting: {} lane(s), {} run(s) x {} spin(s), speed {}",
            batch_id,
            self.lanes.len(),
            run_count,
            spin_limit,
            control.speed()
        );
        for diagnostic in &self.diagnostics {
            warn!("[Runner] {}", diagnostic);
            events.send(SimulationEvent::Diagnostic(diagnostic.clone()));
        }

        let mut random = RandomOutcomes::from_seed(self.seed);
        let mut runs: Vec<RunRecord> = Vec::new();
        let mut cancelled = false;

        for run in 0..run_count {
            if control.is_cancelled() {
                cancelled = true;
                break;
            }

            let record = match &self.fixed {
                Some(outcomes) => {
                    let mut source = FixedOutcomes::new(outcomes.iter().cloned());
                    self.play_run(run, spin_limit, &mut source, &mut control, &mut events)
                        .await
                }
                None => {
                    self.play_run(run, spin_limit, &mut random, &mut control, &mut events)
                        .await
                }
            };

            events.send(SimulationEvent::RunFinished {
                run,
                outcome: record.outcome(),
                end: record.end.clone(),
            });
            let stop = record.is_cancelled();
            runs.push(record);
            if stop {
                cancelled = true;
                break;
            }
        }

        let completed: Vec<RunOutcome> = runs
            .iter()
            .filter(|r| !r.is_cancelled())
            .map(RunRecord::outcome)
            .collect();
        let stats = aggregate(&completed);

        info!(
            "[Runner] Batch {} {}: {} run(s), {} win / {} loss / {} tie, avg final bankroll {}",
            batch_id,
            if cancelled { "cancelled" } else { "finished" },
            stats.runs,
            stats.wins,
            stats.losses,
            stats.ties,
            stats.avg_final_bankroll
        );

        let report = BatchReport {
            batch_id,
            started_at,
            finished_at: Utc::now(),
            runs,
            stats,
            cancelled,
            diagnostics: std::mem::take(&mut self.diagnostics),
        };

        events.send(SimulationEvent::BatchFinished {
            batch_id,
            stats: report.stats.clone(),
            cancelled,
        });
        if !cancelled {
            self.dispatch_analysis(&report, events.sender());
        }

        control.finish();
        report
    }

    /// Why the run cannot take another spin, checked before any bets
    fn stop_reason(
        &self,
        spins: u32,
        spin_limit: u32,
        bankroll: Money,
        source: &dyn OutcomeSource,
    ) -> Option<RunEnd> {
        if source.remaining() == Some(0) {
            return Some(RunEnd::SequenceExhausted);
        }
        if spins >= spin_limit {
            return Some(RunEnd::SpinLimit);
        }
        // Test mode plays the whole sequence regardless of bankroll
        if self.fixed.is_none() {
            if bankroll <= Decimal::ZERO {
                return Some(RunEnd::Bankrupt);
            }
            if self.settings.profit_goal_reached(bankroll) {
                return Some(RunEnd::ProfitGoal);
            }
        }
        None
    }

    async fn play_run(
        &self,
        run: u32,
        spin_limit: u32,
        source: &mut dyn OutcomeSource,
        control: &mut Controller,
        events: &mut EventPublisher,
    ) -> RunRecord {
        let starting_bankroll = self.settings.starting_bankroll;
        let mut bankroll = starting_bankroll;
        let mut lanes: Vec<RuntimeLane> = self.lanes.iter().map(RuntimeLane::new).collect();
        let mut history: Vec<SpinResult> = Vec::new();
        let mut steps: Vec<SimulationStep> = Vec::new();
        let mut spins: u32 = 0;

        events.begin_run(run, starting_bankroll);
        debug!("[Runner] Run {} started with {}", run, source.name());

        let end = loop {
            // Stop checks run ahead of the gate so a finished run never waits on a signal
            if let Some(end) = self.stop_reason(spins, spin_limit, bankroll, &*source) {
                break end;
            }
            if !control.gate(events).await {
                break RunEnd::Cancelled;
            }

            let index = spins + 1;
            let mut ids = BetIdAllocator::new(run, index);
            let tickets: Vec<BetTicket> = self
                .lanes
                .iter()
                .zip(lanes.iter_mut())
                .map(|(lane, runtime)| lane.prepare(&mut runtime.state, &history, &mut ids))
                .collect();

            // All or nothing: a short bankroll places no bets at all
            let total_wager: Money = tickets.iter().map(|t| t.wager).sum();
            if total_wager > bankroll {
                warn!(
                    "[Runner] Run {} spin {}: wager {} exceeds bankroll {}, stopping",
                    run, index, total_wager, bankroll
                );
                let step = self.shortfall_step(index, bankroll, total_wager, &lanes, &tickets);
                steps.push(step.clone());
                events.step(step, true);
                break RunEnd::InsufficientFunds {
                    required: total_wager,
                    available: bankroll,
                };
            }

            let Some(outcome) = source.next_outcome() else {
                break RunEnd::SequenceExhausted;
            };

            let step = self.resolve_spin(index, &outcome, bankroll, &mut lanes, &tickets);
            for ((lane, runtime), (ticket, snapshot)) in self
                .lanes
                .iter()
                .zip(lanes.iter_mut())
                .zip(tickets.iter().zip(&step.lanes))
            {
                runtime.state = lane.settle(&runtime.state, ticket, snapshot.profit);
            }

            debug!(
                "[Runner] Run {} spin {}: {} ({}) wager {} net {} bankroll {}",
                run,
                index,
                outcome,
                outcome.color,
                step.total_wager,
                step.net_profit,
                step.bankroll_after
            );

            bankroll = step.bankroll_after;
            spins = index;
            history.push(outcome);

            let last = self.stop_reason(spins, spin_limit, bankroll, &*source).is_some();
            steps.push(step.clone());
            events.step(step, last);
        };

        if end == RunEnd::Cancelled {
            events.close_cancelled();
        } else {
            events.flush();
        }

        info!(
            "[Runner] Run {} ended after {} spin(s): {}, bankroll {} -> {}",
            run, spins, end, starting_bankroll, bankroll
        );

        RunRecord {
            run,
            starting_bankroll,
            final_bankroll: bankroll,
            spins,
            result: RunResult::classify(starting_bankroll, bankroll),
            end,
            steps,
        }
    }

    /// Resolve every lane against the outcome and build the audit step
    fn resolve_spin(
        &self,
        index: u32,
        outcome: &SpinResult,
        bankroll: Money,
        lanes: &mut [RuntimeLane],
        tickets: &[BetTicket],
    ) -> SimulationStep {
        let mut snapshots = Vec::with_capacity(lanes.len());
        let mut bets = Vec::new();
        let mut triggers = Vec::new();
        let mut net_profit = Decimal::ZERO;
        let mut total_wager = Decimal::ZERO;

        for ((lane, runtime), ticket) in self.lanes.iter().zip(lanes.iter_mut()).zip(tickets) {
            let resolution = self.resolver.resolve(&ticket.bets, outcome);
            runtime.balance += resolution.profit;
            net_profit += resolution.profit;
            total_wager += resolution.wager;

            bets.extend(
                ticket
                    .bets
                    .iter()
                    .zip(&resolution.bets)
                    .map(|(bet, resolved)| EvaluatedBet {
                        lane_id: lane.id().to_string(),
                        bet: bet.clone(),
                        hit: resolved.hit,
                        profit: resolved.profit,
                    }),
            );
            triggers.extend(fired_notes(lane, ticket));
            snapshots.push(LaneSnapshot {
                lane_id: lane.id().to_string(),
                wager: resolution.wager,
                profit: resolution.profit,
                balance: runtime.balance,
                state: runtime.state,
                reset: ticket.reset,
            });
        }

        SimulationStep {
            index,
            kind: StepKind::Resolved,
            outcome: Some(outcome.clone()),
            bankroll_before: bankroll,
            total_wager,
            net_profit,
            bankroll_after: bankroll + net_profit,
            lanes: snapshots,
            triggers,
            bets,
            note: None,
        }
    }

    /// Terminal record for a spin the bankroll cannot cover
    fn shortfall_step(
        &self,
        index: u32,
        bankroll: Money,
        required: Money,
        lanes: &[RuntimeLane],
        tickets: &[BetTicket],
    ) -> SimulationStep {
        let snapshots = self
            .lanes
            .iter()
            .zip(lanes)
            .zip(tickets)
            .map(|((lane, runtime), ticket)| LaneSnapshot {
                lane_id: lane.id().to_string(),
                wager: ticket.wager,
                profit: Decimal::ZERO,
                balance: runtime.balance,
                state: runtime.state,
                reset: ticket.reset,
            })
            .collect();
        let triggers = self
            .lanes
            .iter()
            .zip(tickets)
            .flat_map(|(lane, ticket)| fired_notes(lane, ticket))
            .collect();

        SimulationStep {
            index,
            kind: StepKind::InsufficientFunds {
                required,
                available: bankroll,
            },
            outcome: None,
            bankroll_before: bankroll,
            total_wager: required,
            net_profit: Decimal::ZERO,
            bankroll_after: bankroll,
            lanes: snapshots,
            triggers,
            bets: Vec::new(),
            note: Some(format!(
                "Insufficient funds: wager {} exceeds bankroll {}",
                required, bankroll
            )),
        }
    }

    /// Hand the finished batch to the analyst without waiting on it
    fn dispatch_analysis(
        &self,
        report: &BatchReport,
        events: Option<mpsc::UnboundedSender<SimulationEvent>>,
    ) {
        let Some(analyst) = self.analyst.clone() else {
            return;
        };
        let batch_id = report.batch_id;
        let completed: Vec<&RunRecord> = report.completed_runs().collect();

        match completed.as_slice() {
            [] => {}
            [single] => {
                let request = RunAnalysisRequest {
                    starting_bankroll: single.starting_bankroll,
                    final_bankroll: single.final_bankroll,
                    spins: single.spins,
                    steps: single.steps.clone(),
                };
                tokio::spawn(async move {
                    let result = analyst.analyze_run(request).await;
                    deliver_analysis(batch_id, result, events);
                });
            }
            _ => {
                let stats = report.stats.clone();
                tokio::spawn(async move {
                    let result = analyst.analyze_batch(&stats).await;
                    deliver_analysis(batch_id, result, events);
                });
            }
        }
    }
}

fn fired_notes<'a>(lane: &'a Lane, ticket: &'a BetTicket) -> impl Iterator<Item = String> + 'a {
    ticket
        .fired
        .iter()
        .map(move |note| format!("{}: {}", lane.config().display_name(), note))
}

fn deliver_analysis(
    batch_id: Uuid,
    result: std::result::Result<String, AnalysisError>,
    events: Option<mpsc::UnboundedSender<SimulationEvent>>,
) {
    match result {
        Ok(text) => {
            if let Some(tx) = events {
                let _ = tx.send(SimulationEvent::Analysis { batch_id, text });
            }
        }
        Err(e) => warn!("[Runner] Analysis for batch {} failed: {}", batch_id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croupier_core::{Placement, TableError, Wager};
    use rust_decimal_macros::dec;

    fn red_lane(amount: Money) -> LaneConfig {
        LaneConfig::new("red-lane", vec![Wager::new(Placement::red(), amount)])
    }

    fn fixed_settings(sequence: &str) -> Settings {
        Settings {
            fixed_outcome_sequence: Some(sequence.to_string()),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_no_enabled_lanes_is_a_configuration_error() {
        let mut lane = red_lane(dec!(5));
        lane.enabled = false;
        let result = SimulationRunner::new(vec![lane], Settings::default()).run().await;
        assert!(matches!(result, Err(RunnerError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_empty_lanes_is_a_configuration_error() {
        let runner = SimulationRunner::new(
            vec![LaneConfig::new("a", Vec::new()), LaneConfig::new("b", Vec::new())],
            Settings::default(),
        );
        assert!(matches!(
            runner.start(),
            Err(RunnerError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_settings_rejected() {
        let settings = Settings {
            starting_bankroll: Decimal::ZERO,
            ..Settings::default()
        };
        let result = SimulationRunner::new(vec![red_lane(dec!(5))], settings).run().await;
        assert!(matches!(
            result,
            Err(RunnerError::Table(TableError::InvalidSettings(_)))
        ));
    }

    #[tokio::test]
    async fn test_fixed_sequence_plays_one_run_per_token() {
        let settings = Settings {
            number_of_simulations: 5,
            spins_per_simulation: 100,
            ..fixed_settings("1 2 3, 00")
        };
        let report = SimulationRunner::new(vec![red_lane(dec!(10))], settings)
            .run()
            .await
            .unwrap();

        assert_eq!(report.runs.len(), 1);
        let run = &report.runs[0];
        assert_eq!(run.spins, 4);
        assert_eq!(run.end, RunEnd::SequenceExhausted);

        // red wins on 1 and 3, loses on 2 and 00
        let nets: Vec<Money> = run.steps.iter().map(|s| s.net_profit).collect();
        assert_eq!(nets, vec![dec!(10), dec!(-10), dec!(10), dec!(-10)]);
        assert_eq!(run.final_bankroll, dec!(1000));
        assert_eq!(run.result, RunResult::Tie);
        assert!(run.steps.iter().all(SimulationStep::is_balanced));
    }

    #[tokio::test]
    async fn test_degraded_tokens_become_diagnostics() {
        let report = SimulationRunner::new(vec![red_lane(dec!(1))], fixed_settings("7, x9, 12"))
            .run()
            .await
            .unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        let outcome = report.runs[0].steps[1].outcome.clone().unwrap();
        assert_eq!(outcome.value, 0);
    }

    #[tokio::test]
    async fn test_strict_outcomes_reject_before_start() {
        let settings = Settings {
            strict_outcomes: true,
            ..fixed_settings("7, x9")
        };
        let result = SimulationRunner::new(vec![red_lane(dec!(1))], settings).run().await;
        assert!(matches!(
            result,
            Err(RunnerError::Table(TableError::MalformedOutcomeToken { .. }))
        ));
    }

    #[tokio::test]
    async fn test_profit_goal_stops_before_betting() {
        let settings = Settings {
            starting_bankroll: dec!(100),
            spins_per_simulation: 1_000,
            total_profit_goal: dec!(20),
            use_total_profit_goal: true,
            ..Settings::default()
        };
        let report = SimulationRunner::new(vec![red_lane(dec!(10))], settings)
            .with_seed(3)
            .run()
            .await
            .unwrap();

        let run = &report.runs[0];
        assert_eq!(run.end, RunEnd::ProfitGoal);
        assert_eq!(run.final_bankroll, dec!(120));
        assert_eq!(run.steps.len() as u32, run.spins);

        // Only the last committed spin reached the goal; nothing was staked after it
        let (last, earlier) = run.steps.split_last().unwrap();
        assert_eq!(last.bankroll_after, dec!(120));
        assert!(earlier.iter().all(|s| s.bankroll_after < dec!(120)));
        assert!(run.steps.iter().all(|s| !s.is_terminal()));
    }

    #[tokio::test]
    async fn test_empty_bankroll_ends_run_as_bankrupt() {
        // Flat 10 stakes from 10: the bankroll is always 0 or covers the stake
        let settings = Settings {
            starting_bankroll: dec!(10),
            spins_per_simulation: 100_000,
            number_of_simulations: 3,
            ..Settings::default()
        };
        let report = SimulationRunner::new(vec![red_lane(dec!(10))], settings)
            .with_seed(11)
            .run()
            .await
            .unwrap();

        assert_eq!(report.stats.losses, 3);
        for run in &report.runs {
            assert_eq!(run.end, RunEnd::Bankrupt);
            assert_eq!(run.final_bankroll, Decimal::ZERO);
            assert_eq!(run.result, RunResult::Loss);
            assert_eq!(run.steps.len() as u32, run.spins);
            let last = run.steps.last().unwrap();
            assert!(!last.is_terminal());
            assert_eq!(last.bankroll_after, Decimal::ZERO);
        }
    }
}
