// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-adapters: I/O collaborators for fetching job lists and sending batches

pub mod source;
pub mod transport;

pub use source::{http_client, JobSource, SourceError};
pub use transport::{HttpTransport, StdoutTransport, Transport, TransportError};

#[cfg(any(test, feature = "test-support"))]
pub use transport::{FakeTransport, SentPayload};
