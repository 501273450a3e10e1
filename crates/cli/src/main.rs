// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobrunner: fetch a job list, run it, report the results

mod config;
mod exit_error;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use jr_adapters::{http_client, HttpTransport, StdoutTransport, Transport};
use jr_core::JobSpec;
use jr_engine::{RunSummary, Runner};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Config};
use crate::exit_error::ExitError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let exit = ExitError::from_anyhow(err);
            if !exit.message.is_empty() {
                eprintln!("error: {exit}");
            }
            ExitCode::from(exit.code)
        }
    }
}

/// Logs go to stderr; stdout is reserved for dry-run output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(cli)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(execute(config))
}

async fn execute(config: Config) -> anyhow::Result<()> {
    let client = http_client(config.http_timeout).context("failed to build http client")?;
    let jobs = config.source.fetch(&client).await?;

    let summary = if config.dry_run {
        drive(Runner::new(StdoutTransport, config.machine), &jobs).await?
    } else {
        let transport = HttpTransport::new(client, config.user, config.credential);
        drive(Runner::new(transport, config.machine), &jobs).await?
    };

    if summary.batches_failed > 0 {
        tracing::warn!(failed = summary.batches_failed, "some batches were not delivered");
    }
    Ok(())
}

/// Run to completion unless interrupted.
async fn drive<T: Transport>(runner: Runner<T>, jobs: &[JobSpec]) -> Result<RunSummary, ExitError> {
    tokio::select! {
        summary = runner.run(jobs) => Ok(summary),
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, abandoning run");
            Err(ExitError::new(ExitError::INTERRUPTED, "interrupted"))
        }
    }
}
