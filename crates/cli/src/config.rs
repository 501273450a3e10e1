// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use jr_adapters::JobSource;
use thiserror::Error;

/// Run a job list and report the results.
#[derive(Debug, Default, Parser)]
#[command(name = "jobrunner", version, about)]
pub struct Cli {
    /// Credential for the collector's basic auth
    #[arg(long, env = "RUNNER_AUTH", hide_env_values = true)]
    pub auth: Option<String>,

    /// Job list location: http(s) URL, file:// URL or local path
    #[arg(long, env = "RUNNER_URL")]
    pub jobs: Option<String>,

    /// Machine identifier stamped onto every batch
    #[arg(long, env = "RUNNER_MACH")]
    pub machine: Option<String>,

    /// Basic auth user name
    #[arg(long, env = "RUNNER_USER", default_value = "runner")]
    pub user: String,

    /// Timeout for each HTTP request, in milliseconds
    #[arg(long, env = "RUNNER_HTTP_TIMEOUT_MS", default_value_t = 30_000)]
    pub http_timeout_ms: u64,

    /// Print batches to stdout instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {env} (or --{flag})")]
    Missing { flag: &'static str, env: &'static str },
    #[error("--http-timeout-ms must be greater than zero")]
    ZeroTimeout,
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credential: String,
    pub source: JobSource,
    pub machine: Option<String>,
    pub user: String,
    pub http_timeout: Duration,
    pub dry_run: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let credential = required(cli.auth, "auth", "RUNNER_AUTH")?;
        let jobs = required(cli.jobs, "jobs", "RUNNER_URL")?;
        if cli.http_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            credential,
            source: JobSource::parse(&jobs),
            machine: cli.machine.filter(|m| !m.is_empty()),
            user: cli.user,
            http_timeout: Duration::from_millis(cli.http_timeout_ms),
            dry_run: cli.dry_run,
        })
    }
}

fn required(
    value: Option<String>,
    flag: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    value.filter(|v| !v.is_empty()).ok_or(ConfigError::Missing { flag, env })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
