// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The run loop driving generation, batching, dispatch, and pacing.
//!
//! One sequential control flow per run: a batch is generated and dispatched
//! to completion before the next cycle starts, so at most one request is
//! ever in flight and no state is shared across tasks.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::batch::BatchAccumulator;
use crate::config::{Config, RunMode};
use crate::generator::RecordFactory;
use crate::intake::{DispatchOutcome, IntakeClient};
use crate::pacer::{CyclePacer, STREAM_QUANTUM};
use crate::record::LogRecord;
use crate::timestamp::TimeSpread;

/// What a run does when a dispatch reports a connection failure.
///
/// Rejected batches are never fatal; this policy only governs transport
/// failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole run at the first connection failure. Backfill uses
    /// this: a historical dataset that silently lost slices would be
    /// misleading.
    AbortOnConnectionFailure,
    /// Log the failure, drop the batch, and keep going. Stream uses this so
    /// a long-lived generator rides out intake restarts.
    ContinueOnConnectionFailure,
}

impl FailurePolicy {
    pub fn for_mode(mode: RunMode) -> Self {
        match mode {
            RunMode::Backfill => FailurePolicy::AbortOnConnectionFailure,
            RunMode::Stream => FailurePolicy::ContinueOnConnectionFailure,
        }
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run finished its work: backfill hit its target, or stream was
    /// cancelled cleanly
    Completed,
    /// The run stopped early because of a connection failure
    Aborted,
}

/// Final accounting for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// Records generated, including any dropped by an abort
    pub generated: usize,
    /// Records acknowledged by the intake
    pub sent: usize,
    /// Dispatch calls made; one per cycle in stream mode
    pub batches: usize,
}

#[derive(Debug, Default)]
struct RunCounters {
    generated: usize,
    sent: usize,
    batches: usize,
}

fn finish(outcome: RunOutcome, counters: RunCounters) -> RunSummary {
    RunSummary {
        outcome,
        generated: counters.generated,
        sent: counters.sent,
        batches: counters.batches,
    }
}

/// Drives one complete run in either mode.
pub struct RunLoop {
    mode: RunMode,
    policy: FailurePolicy,
    spread: TimeSpread,
    batch_size: usize,
    total_records: usize,
    records_per_second: usize,
    quantum: Duration,
    factory: RecordFactory,
    accumulator: BatchAccumulator,
    intake: IntakeClient,
    cancel_token: CancellationToken,
}

impl RunLoop {
    pub fn new(
        config: &Config,
        factory: RecordFactory,
        intake: IntakeClient,
        cancel_token: CancellationToken,
    ) -> Self {
        let spread = match config.mode {
            RunMode::Backfill => TimeSpread::Backfill {
                window_secs: config.backfill_window_secs,
            },
            RunMode::Stream => TimeSpread::Live,
        };
        // Stream cycles ship one full-rate batch, so the accumulator is
        // sized to the rate rather than the backfill batch size.
        let accumulator = match config.mode {
            RunMode::Backfill => BatchAccumulator::new(config.batch_size),
            RunMode::Stream => BatchAccumulator::new(config.records_per_second),
        };

        RunLoop {
            mode: config.mode,
            policy: FailurePolicy::for_mode(config.mode),
            spread,
            batch_size: config.batch_size,
            total_records: config.total_records,
            records_per_second: config.records_per_second,
            quantum: STREAM_QUANTUM,
            factory,
            accumulator,
            intake,
            cancel_token,
        }
    }

    /// Override the stream pacing quantum. Used by tests that cannot wait
    /// out real seconds.
    pub fn with_quantum(mut self, quantum: Duration) -> Self {
        self.quantum = quantum;
        self
    }

    /// Drive the run to its terminal state and report the final counts.
    pub async fn run(self) -> RunSummary {
        match self.mode {
            RunMode::Backfill => self.run_backfill().await,
            RunMode::Stream => self.run_stream().await,
        }
    }

    async fn run_backfill(mut self) -> RunSummary {
        info!(
            "Backfill run: {} records in batches of up to {}",
            self.total_records, self.batch_size
        );
        let mut counters = RunCounters::default();

        while counters.generated < self.total_records {
            let record = self.factory.generate(self.spread);
            self.accumulator.push(record);
            counters.generated += 1;

            if self.accumulator.is_full() {
                let batch = self.accumulator.drain();
                if !self.dispatch(batch, &mut counters).await {
                    return finish(RunOutcome::Aborted, counters);
                }
            }
        }

        // Trailing partial batch
        if !self.accumulator.is_empty() {
            let batch = self.accumulator.drain();
            if !self.dispatch(batch, &mut counters).await {
                return finish(RunOutcome::Aborted, counters);
            }
        }

        finish(RunOutcome::Completed, counters)
    }

    async fn run_stream(mut self) -> RunSummary {
        info!("Stream run: {} records per cycle", self.records_per_second);
        let pacer = CyclePacer::new(self.quantum);
        let mut counters = RunCounters::default();

        let mut cancelled = self.cancel_token.is_cancelled();
        while !cancelled {
            let cycle = pacer.begin();

            for _ in 0..self.records_per_second {
                let record = self.factory.generate(self.spread);
                self.accumulator.push(record);
            }
            counters.generated += self.records_per_second;

            let batch = self.accumulator.drain();
            if !self.dispatch(batch, &mut counters).await {
                return finish(RunOutcome::Aborted, counters);
            }

            pacer.finish(cycle).await;
            cancelled = self.cancel_token.is_cancelled();
        }

        info!("Stream cancelled after {} cycles", counters.batches);
        finish(RunOutcome::Completed, counters)
    }

    async fn dispatch(&self, batch: Vec<LogRecord>, counters: &mut RunCounters) -> bool {
        counters.batches += 1;
        let outcome = self.intake.send_batch(&batch).await;
        self.handle_outcome(outcome, counters)
    }

    /// Apply the mode's failure policy to one dispatch outcome. Returns
    /// false when the run must abort.
    fn handle_outcome(&self, outcome: DispatchOutcome, counters: &mut RunCounters) -> bool {
        match outcome {
            DispatchOutcome::Accepted { count } => {
                counters.sent += count;
                match self.mode {
                    RunMode::Backfill => {
                        info!("Sent {}/{} records", counters.sent, self.total_records);
                    }
                    RunMode::Stream => {
                        info!(
                            "Cycle {}: sent {count} records (total {})",
                            counters.batches, counters.sent
                        );
                    }
                }
                true
            }
            DispatchOutcome::Rejected { status, body } => {
                warn!("Intake rejected batch with status {status}: {body}");
                true
            }
            DispatchOutcome::ConnectionFailure { reason } => match self.policy {
                FailurePolicy::AbortOnConnectionFailure => {
                    error!("Intake unreachable, aborting run: {reason}");
                    false
                }
                FailurePolicy::ContinueOnConnectionFailure => {
                    warn!("Intake unreachable, dropping batch: {reason}");
                    true
                }
            },
        }
    }
}
