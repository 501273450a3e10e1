// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One pass over a job list.

use jr_adapters::Transport;
use jr_core::{Clock, JobSpec, Report, SystemClock};
use jr_exec::JobExecutor;

use crate::aggregator::{Aggregator, Flush};
use crate::reporter::BatchReporter;

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub jobs: usize,
    /// Jobs whose report carries error text
    pub failed_jobs: usize,
    pub batches_sent: usize,
    pub batches_failed: usize,
}

impl RunSummary {
    fn record_job(&mut self, report: &Report) {
        self.jobs += 1;
        if !report.is_success() {
            self.failed_jobs += 1;
        }
    }
}

/// Executes jobs strictly in order and reports their batches.
pub struct Runner<T, C: Clock = SystemClock> {
    executor: JobExecutor<C>,
    reporter: BatchReporter<T>,
    clock: C,
    machine: Option<String>,
}

impl<T: Transport> Runner<T, SystemClock> {
    pub fn new(transport: T, machine: Option<String>) -> Self {
        Self::with_clock(transport, machine, SystemClock)
    }
}

impl<T: Transport, C: Clock> Runner<T, C> {
    pub fn with_clock(transport: T, machine: Option<String>, clock: C) -> Self {
        Self {
            executor: JobExecutor::with_clock(clock.clone()),
            reporter: BatchReporter::new(transport),
            clock,
            machine,
        }
    }

    /// Run every job, then flush whatever batch is still open.
    ///
    /// A batch is sent as soon as the next job starts a different label,
    /// before that job runs.
    ///
    /// Job and reporting failures are logged and counted; they never stop
    /// the run.
    pub async fn run(&self, jobs: &[JobSpec]) -> RunSummary {
        let mut aggregator = Aggregator::new(self.clock.utc_now(), self.machine.clone());
        let mut summary = RunSummary::default();
        tracing::info!(jobs = jobs.len(), "starting run");

        for (index, job) in jobs.iter().enumerate() {
            if let Some(flush) = aggregator.observe(job) {
                self.deliver(&flush, &mut summary).await;
            }
            tracing::debug!(index, detail = %job.detail, log_key = %job.log_key, "running job");
            let report = self.executor.execute(job).await;
            summary.record_job(&report);
            aggregator.append(job, report);
        }
        if let Some(flush) = aggregator.finish() {
            self.deliver(&flush, &mut summary).await;
        }

        tracing::info!(
            jobs = summary.jobs,
            failed_jobs = summary.failed_jobs,
            batches_sent = summary.batches_sent,
            batches_failed = summary.batches_failed,
            "run finished"
        );
        summary
    }

    async fn deliver(&self, flush: &Flush, summary: &mut RunSummary) {
        match self.reporter.report(flush).await {
            Ok(()) => summary.batches_sent += 1,
            Err(e) => {
                tracing::warn!(error = %e, "batch not delivered");
                summary.batches_failed += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
