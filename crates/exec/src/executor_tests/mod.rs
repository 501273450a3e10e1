// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the job executor.

use super::*;

mod output;
mod sidecar;
mod timeout;
mod warmup;

/// Create a default executor for tests.
pub(crate) fn executor() -> JobExecutor {
    JobExecutor::new()
}

/// Sync wrapper for async execution in parameterized tests.
pub(crate) fn run_async<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Runtime::new().unwrap().block_on(f)
}
