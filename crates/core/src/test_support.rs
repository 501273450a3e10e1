// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::job::{Background, JobSpec};
use std::path::PathBuf;
use std::time::Duration;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job lists.
pub mod strategies {
    use crate::job::JobSpec;
    use proptest::prelude::*;

    /// A no-op job with a log key drawn from a small alphabet (empty included)
    /// so generated lists exercise label transitions and untracked jobs.
    pub fn arb_labelled_job() -> impl Strategy<Value = JobSpec> {
        (prop_oneof![Just(""), Just("a"), Just("b"), Just("c")], any::<u8>()).prop_map(
            |(key, n)| JobSpec {
                detail: format!("job-{n}"),
                log_key: key.to_string(),
                ..JobSpec::default()
            },
        )
    }

    pub fn arb_job_list(max: usize) -> impl Strategy<Value = Vec<JobSpec>> {
        prop::collection::vec(arb_labelled_job(), 0..max)
    }
}

// ── Builders ────────────────────────────────────────────────────────────

/// Builder for [`JobSpec`] values in tests.
#[derive(Debug, Clone, Default)]
pub struct JobBuilder {
    job: JobSpec,
}

impl JobBuilder {
    /// Start from a command line.
    pub fn cmd(argv: &[&str]) -> Self {
        Self { job: JobSpec { command: argv.iter().map(|s| s.to_string()).collect(), ..JobSpec::default() } }
    }

    /// Shorthand for `sh -c <script>`.
    pub fn sh(script: &str) -> Self {
        Self::cmd(&["sh", "-c", script])
    }

    pub fn noop() -> Self {
        Self::default()
    }

    pub fn detail(mut self, detail: &str) -> Self {
        self.job.detail = detail.to_string();
        self
    }

    pub fn log_key(mut self, key: &str) -> Self {
        self.job.log_key = key.to_string();
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.job.url = Some(url.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.job.timeout = timeout;
        self
    }

    pub fn run_twice(mut self) -> Self {
        self.job.run_twice = true;
        self
    }

    pub fn send_output(mut self) -> Self {
        self.job.send_output = true;
        self
    }

    pub fn base64(mut self) -> Self {
        self.job.base64_output = true;
        self
    }

    pub fn save(mut self, path: impl Into<PathBuf>) -> Self {
        self.job.save = Some(path.into());
        self
    }

    pub fn background(mut self, delay: Duration, argv: &[&str]) -> Self {
        self.job.background =
            Some(Background { delay, command: argv.iter().map(|s| s.to_string()).collect() });
        self
    }

    pub fn build(self) -> JobSpec {
        self.job
    }
}
