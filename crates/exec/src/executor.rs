// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job executor: warm-up, sidecar, and the captured main run.

use base64::Engine as _;
use jr_core::{Clock, JobSpec, Report, SystemClock};
use tracing::Instrument;

use super::deadline::Deadline;
use super::error::ExecError;
use super::process;
use super::sink::OutputSink;

/// Executes job specifications one at a time.
///
/// Every failure is folded into the returned report's `error` field;
/// `execute` itself never fails.
#[derive(Debug, Clone, Default)]
pub struct JobExecutor<C: Clock = SystemClock> {
    clock: C,
}

impl JobExecutor<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> JobExecutor<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Execute one job and report its outcome.
    ///
    /// `start` and `duration` cover only the main run. A sidecar, if any,
    /// has been reaped by the time this returns.
    pub async fn execute(&self, job: &JobSpec) -> Report {
        let Some((program, args)) = job.program() else {
            tracing::debug!(detail = %job.detail, "no command, skipping");
            return Report::empty(&job.detail);
        };

        let span = tracing::info_span!("job", detail = %job.detail, cmd = program);
        self.execute_inner(job, program, args).instrument(span).await
    }

    async fn execute_inner(&self, job: &JobSpec, program: &str, args: &[String]) -> Report {
        // Held until this function returns, on every path.
        let mut sink = match OutputSink::open(job.save_path(), job.send_output).await {
            Ok(sink) => sink,
            Err(e) => return abort(job, e),
        };

        if job.run_twice {
            tracing::debug!("warm-up run");
            if let Err(e) = process::run_discarded(program, args).await {
                return abort(job, ExecError::WarmUp(Box::new(e)));
            }
        }

        let sidecar = match job.sidecar().and_then(|bg| bg.program().map(|p| (bg.delay, p))) {
            Some((delay, (bg_program, bg_args))) => {
                let child = match process::spawn_sidecar(bg_program, bg_args) {
                    Ok(child) => child,
                    Err(e) => return abort(job, ExecError::Sidecar(Box::new(e))),
                };
                tracing::debug!(sidecar = bg_program, delay_ms = delay.as_millis() as u64, "sidecar started");
                tokio::time::sleep(delay).await;
                Some((child, bg_program))
            }
            None => None,
        };

        let start = self.clock.utc_now();
        let started = self.clock.now();
        let deadline = Deadline::new(job.timeout_limit());
        let outcome = process::run_captured(program, args, &mut sink, &deadline).await;
        let duration = self.clock.now().saturating_duration_since(started);

        if let Some((child, bg_program)) = sidecar {
            process::reap(child, bg_program).await;
        }

        let error = outcome.error_text();
        match &outcome.failure {
            Some(failure) => tracing::warn!(
                error = %failure,
                timed_out = failure.is_timeout(),
                duration_ms = duration.as_millis() as u64,
                "job failed"
            ),
            None => tracing::info!(
                duration_ms = duration.as_millis() as u64,
                stderr = !outcome.stderr.is_empty(),
                "job completed"
            ),
        }

        let output = if job.send_output {
            sink.into_captured().map(|bytes| encode_output(bytes, job.base64_output))
        } else {
            None
        };

        Report { detail: job.detail.clone(), start, duration, output, error }
    }
}

fn abort(job: &JobSpec, error: ExecError) -> Report {
    tracing::warn!(error = %error, "job aborted before main run");
    Report::aborted(&job.detail, error.to_string())
}

fn encode_output(bytes: Vec<u8>, base64: bool) -> String {
    if base64 {
        base64::engine::general_purpose::STANDARD.encode(bytes)
    } else {
        String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }
}
