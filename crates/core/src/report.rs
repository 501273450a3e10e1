// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution results and the batches they are reported in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Seconds from 0001-01-01T00:00:00Z to the Unix epoch.
const YEAR_ONE_OFFSET: i64 = -62_135_596_800;

/// Start time of a job whose main run never happened: 0001-01-01T00:00:00Z,
/// the zero time collectors already recognise.
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(YEAR_ONE_OFFSET, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Outcome of executing one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub detail: String,
    /// When the main run started (zero value if it never ran)
    pub start: DateTime<Utc>,
    /// Wall-clock time of the main run
    #[serde(with = "crate::duration::nanos")]
    pub duration: Duration,
    /// Captured stdout, raw or base64 encoded
    #[serde(default, skip_serializing_if = "is_absent")]
    pub output: Option<String>,
    /// Failure reason and stderr; empty on success
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            detail: String::new(),
            start: zero_time(),
            duration: Duration::ZERO,
            output: None,
            error: String::new(),
        }
    }
}

impl Report {
    /// Zero-value report for a job that ran nothing.
    pub fn empty(detail: impl Into<String>) -> Self {
        Self { detail: detail.into(), ..Self::default() }
    }

    /// Report for a job that stopped before its main run.
    pub fn aborted(detail: impl Into<String>, error: impl Into<String>) -> Self {
        Self { detail: detail.into(), error: error.into(), ..Self::default() }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// Reports sharing one label, sent to the collector as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub label: String,
    /// When the run that produced this batch began
    #[serde(rename = "batch")]
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    pub reports: Vec<Report>,
}

impl Batch {
    pub fn new(label: impl Into<String>, started_at: DateTime<Utc>, machine: Option<String>) -> Self {
        Self { label: label.into(), started_at, machine, reports: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

fn is_absent(output: &Option<String>) -> bool {
    output.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
