// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming grouping of reports into labelled batches.
//!
//! Grouping is single-pass and order-preserving, not a group-by: a label
//! that reappears after another label starts a fresh batch.

use chrono::{DateTime, Utc};
use jr_core::{Batch, JobSpec, Report};

/// A completed batch and where it should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flush {
    pub batch: Batch,
    /// Most recent non-empty job url at flush time
    pub destination: Option<String>,
}

/// Accumulates reports for the currently open label.
#[derive(Debug)]
pub struct Aggregator {
    started_at: DateTime<Utc>,
    machine: Option<String>,
    open: Option<Batch>,
    // Not reset between batches: a batch without a url of its own goes
    // wherever the previous one went.
    destination: Option<String>,
}

impl Aggregator {
    /// `started_at` stamps every batch of the run.
    pub fn new(started_at: DateTime<Utc>, machine: Option<String>) -> Self {
        Self { started_at, machine, open: None, destination: None }
    }

    /// Call before executing `job`. Opens its batch and returns the
    /// previously open one when the label changes, so that batch can be
    /// sent before the job runs.
    ///
    /// Jobs without a log key never close a batch.
    pub fn observe(&mut self, job: &JobSpec) -> Option<Flush> {
        if !job.is_tracked() {
            return None;
        }

        let flushed = match &self.open {
            Some(batch) if batch.label != job.log_key => self.take(),
            _ => None,
        };

        if let Some(url) = job.destination() {
            self.destination = Some(url.to_string());
        }

        if self.open.is_none() {
            tracing::debug!(label = %job.log_key, "opening batch");
            self.open = Some(Batch::new(job.log_key.clone(), self.started_at, self.machine.clone()));
        }

        flushed
    }

    /// Add the report of a job already passed to [`observe`](Self::observe).
    ///
    /// Reports of jobs without a log key are dropped.
    pub fn append(&mut self, job: &JobSpec, report: Report) {
        if !job.is_tracked() {
            return;
        }
        match self.open.as_mut() {
            Some(batch) if batch.label == job.log_key => batch.reports.push(report),
            _ => tracing::warn!(label = %job.log_key, "report for unobserved job dropped"),
        }
    }

    /// Close out the run, returning the open batch if there is one.
    pub fn finish(mut self) -> Option<Flush> {
        self.take()
    }

    /// Label of the batch currently accumulating.
    pub fn open_label(&self) -> Option<&str> {
        self.open.as_ref().map(|b| b.label.as_str())
    }

    fn take(&mut self) -> Option<Flush> {
        let batch = self.open.take()?;
        Some(Flush { batch, destination: self.destination.clone() })
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
