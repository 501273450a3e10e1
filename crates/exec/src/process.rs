// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning and waiting on the processes that make up a job.

use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

use super::deadline::Deadline;
use super::error::ExecError;
use super::sink::OutputSink;

/// What the captured main run produced.
#[derive(Debug, Default)]
pub(crate) struct RunOutcome {
    pub(crate) failure: Option<ExecError>,
    pub(crate) stderr: Vec<u8>,
}

impl RunOutcome {
    fn failed(failure: ExecError) -> Self {
        Self { failure: Some(failure), stderr: Vec::new() }
    }

    /// Failure reason on the first line, stderr after it.
    ///
    /// Stderr from a successful run is still reported.
    pub(crate) fn error_text(&self) -> String {
        let stderr = String::from_utf8_lossy(&self.stderr);
        match &self.failure {
            Some(failure) if stderr.is_empty() => failure.to_string(),
            Some(failure) => format!("{failure}\n{stderr}"),
            None => stderr.into_owned(),
        }
    }
}

enum Exit {
    Finished(std::process::ExitStatus),
    Expired,
}

/// Run the main command: stdout into `sink`, stderr captured, bounded by
/// `deadline`. An expired deadline kills the process.
pub(crate) async fn run_captured(
    program: &str,
    args: &[String],
    sink: &mut OutputSink,
    deadline: &Deadline,
) -> RunOutcome {
    let mut process = Command::new(program);
    process.args(args);
    process.stdin(Stdio::null());
    process.stdout(if sink.is_discard() { Stdio::null() } else { Stdio::piped() });
    process.stderr(Stdio::piped());
    process.kill_on_drop(true);
    // Own group, so expiry can kill everything the command forked.
    #[cfg(unix)]
    process.process_group(0);

    let mut child = match process.spawn() {
        Ok(child) => child,
        Err(source) => {
            return RunOutcome::failed(ExecError::SpawnFailed { command: program.to_string(), source })
        }
    };
    let group = child.id();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let pump = async {
        match stdout {
            Some(mut out) => sink.pump(&mut out).await.map(|_| ()),
            None => Ok(()),
        }
    };
    let drain = async {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr {
            err.read_to_end(&mut buf).await?;
        }
        Ok::<_, std::io::Error>(buf)
    };
    let wait = async {
        let exit = tokio::select! {
            status = child.wait() => Exit::Finished(status?),
            () = deadline.expired() => Exit::Expired,
        };
        if let Exit::Expired = exit {
            tracing::debug!(cmd = program, "deadline expired, killing process group");
            kill_group(&mut child, group)?;
            child.wait().await?;
        }
        Ok::<_, std::io::Error>(exit)
    };

    let (pumped, drained, waited) = tokio::join!(pump, drain, wait);

    let capture_err = |source| ExecError::Capture { command: program.to_string(), source };
    let failure = match waited {
        Ok(Exit::Finished(status)) => ExecError::from_status(program, status),
        Ok(Exit::Expired) => Some(ExecError::TimedOut {
            command: program.to_string(),
            after: deadline.limit().unwrap_or_default(),
        }),
        Err(source) => Some(capture_err(source)),
    };
    let failure = failure.or_else(|| pumped.err().map(capture_err));
    let (failure, stderr) = match drained {
        Ok(stderr) => (failure, stderr),
        Err(source) => (failure.or_else(|| Some(capture_err(source))), Vec::new()),
    };

    RunOutcome { failure, stderr }
}

/// SIGKILL the process group led by the child, falling back to the child
/// alone when the group cannot be signalled.
#[cfg(unix)]
fn kill_group(child: &mut Child, group: Option<u32>) -> std::io::Result<()> {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Some(pgid) = group.and_then(|id| i32::try_from(id).ok()) {
        match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
            Ok(()) => return Ok(()),
            Err(e) => tracing::debug!(pgid, error = %e, "killpg failed, killing child only"),
        }
    }
    child.start_kill()
}

#[cfg(not(unix))]
fn kill_group(child: &mut Child, _group: Option<u32>) -> std::io::Result<()> {
    child.start_kill()
}

/// Run a command with all output discarded and no time bound.
pub(crate) async fn run_discarded(program: &str, args: &[String]) -> Result<(), ExecError> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|source| ExecError::SpawnFailed { command: program.to_string(), source })?;
    match ExecError::from_status(program, status) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Start a detached sidecar. The caller must reap it with [`reap`]; it is
/// killed if dropped unreaped.
pub(crate) fn spawn_sidecar(program: &str, args: &[String]) -> Result<Child, ExecError> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecError::SpawnFailed { command: program.to_string(), source })
}

/// Wait for a sidecar to exit. Its status never affects the job.
pub(crate) async fn reap(mut sidecar: Child, program: &str) {
    match sidecar.wait().await {
        Ok(status) => tracing::debug!(cmd = program, %status, "sidecar exited"),
        Err(e) => tracing::warn!(cmd = program, error = %e, "failed to reap sidecar"),
    }
}
