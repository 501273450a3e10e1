// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-exec: turns one job specification into process invocations.
//!
//! A job runs as up to three processes: an optional silent warm-up of the
//! main command, an optional background sidecar, and the captured main run.

mod deadline;
mod error;
mod executor;
mod process;
mod sink;

pub use deadline::Deadline;
pub use error::ExecError;
pub use executor::JobExecutor;
pub use sink::{OutputSink, Sink};

#[cfg(test)]
mod executor_tests;
