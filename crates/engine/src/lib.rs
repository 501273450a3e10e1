// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-engine: runs a job list and reports grouped results

pub mod aggregator;
pub mod reporter;
pub mod runner;

pub use aggregator::{Aggregator, Flush};
pub use reporter::{BatchReporter, ReportError};
pub use runner::{RunSummary, Runner};
