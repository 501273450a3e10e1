// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution error types.
//!
//! The `Display` form of each variant is what ends up in a report's
//! `error` field, so messages stay short and single-line.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Errors that can occur while executing a job.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// Command not found or could not be spawned.
    #[error("failed to spawn {command}: {source}")]
    SpawnFailed { command: String, source: std::io::Error },

    /// Process exited with a non-zero code.
    #[error("exit status {code}")]
    Exited { command: String, code: i32 },

    /// Process was terminated by a signal it did not handle.
    #[error("signal: {signal}")]
    Signaled { command: String, signal: String },

    /// The run outlived its timeout and was killed.
    #[error("timed out after {after:?}")]
    TimedOut { command: String, after: Duration },

    /// The save file could not be created.
    #[error("failed to create {}: {source}", path.display())]
    SaveFile { path: PathBuf, source: std::io::Error },

    /// Reading the process's output or waiting on it failed.
    #[error("failed to capture output of {command}: {source}")]
    Capture { command: String, source: std::io::Error },

    /// The silent warm-up run failed.
    #[error("error on first run: {0}")]
    WarmUp(Box<ExecError>),

    /// The background sidecar could not be started.
    #[error("error starting background process: {0}")]
    Sidecar(Box<ExecError>),
}

impl ExecError {
    /// Map an exit status to an error, `None` on success.
    pub fn from_status(command: &str, status: ExitStatus) -> Option<Self> {
        if status.success() {
            return None;
        }
        if let Some(code) = status.code() {
            return Some(ExecError::Exited { command: command.to_string(), code });
        }
        Some(ExecError::Signaled { command: command.to_string(), signal: signal_name(status) })
    }

    /// Whether the run was killed at its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecError::TimedOut { .. })
    }
}

#[cfg(unix)]
fn signal_name(status: ExitStatus) -> String {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(n) => match Signal::try_from(n) {
            Ok(sig) => sig.as_str().to_string(),
            Err(_) => n.to_string(),
        },
        None => "unknown".to_string(),
    }
}

#[cfg(not(unix))]
fn signal_name(_status: ExitStatus) -> String {
    "unknown".to_string()
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
