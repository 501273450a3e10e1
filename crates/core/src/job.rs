// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job specification as fetched from the job source.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// An ordered job list, executed front to back.
pub type JobList = Vec<JobSpec>;

/// Declarative description of one unit of work.
///
/// Every field except `cmd` is optional on the wire. Nothing is rejected:
/// an empty command is a no-op job, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Free-text description carried into the report
    #[serde(default)]
    pub detail: String,
    /// Executable followed by its arguments
    #[serde(default, rename = "cmd", skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    /// Sidecar process started before the main command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    /// Bound on the main run; zero means unbounded
    #[serde(default, with = "crate::duration::nanos", skip_serializing_if = "Duration::is_zero")]
    pub timeout: Duration,
    /// Run once silently before the captured run
    #[serde(default, skip_serializing_if = "is_false")]
    pub run_twice: bool,
    /// Keep captured stdout in the report
    #[serde(default, rename = "sendOut", skip_serializing_if = "is_false")]
    pub send_output: bool,
    /// Base64-encode the kept stdout
    #[serde(default, rename = "base64", skip_serializing_if = "is_false")]
    pub base64_output: bool,
    /// Batch label; empty means the job is not reported
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log_key: String,
    /// Collector endpoint for the batch this job lands in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// File that receives the main run's stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<PathBuf>,
}

/// Sidecar launched before the main command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    /// Wait after launching before the main command starts
    #[serde(default, with = "crate::duration::nanos")]
    pub delay: Duration,
    #[serde(default, rename = "cmd")]
    pub command: Vec<String>,
}

impl JobSpec {
    /// Whether the result belongs in a report batch.
    pub fn is_tracked(&self) -> bool {
        !self.log_key.is_empty()
    }

    /// Timeout for the main run, `None` when unbounded.
    pub fn timeout_limit(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }

    /// The sidecar, if one with a command is configured.
    pub fn sidecar(&self) -> Option<&Background> {
        self.background.as_ref().filter(|bg| !bg.command.is_empty())
    }

    /// Non-empty collector endpoint.
    pub fn destination(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Non-empty save path.
    pub fn save_path(&self) -> Option<&Path> {
        self.save.as_deref().filter(|p| !p.as_os_str().is_empty())
    }

    /// Program and arguments split for spawning; `None` for a no-op job.
    pub fn program(&self) -> Option<(&str, &[String])> {
        split_command(&self.command)
    }
}

impl Background {
    pub fn program(&self) -> Option<(&str, &[String])> {
        split_command(&self.command)
    }
}

fn split_command(command: &[String]) -> Option<(&str, &[String])> {
    command.split_first().map(|(name, args)| (name.as_str(), args))
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
