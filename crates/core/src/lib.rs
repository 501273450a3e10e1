// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-core: job and report data model for the jobrunner tool

pub mod clock;
pub mod duration;
pub mod job;
pub mod report;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use job::{Background, JobList, JobSpec};
pub use report::{zero_time, Batch, Report};

#[cfg(any(test, feature = "test-support"))]
pub use test_support::JobBuilder;
