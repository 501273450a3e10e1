// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellable execution handle bound to a duration.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Fires once `limit` has elapsed since creation.
///
/// An unbounded deadline never fires. The timer task is aborted on drop.
#[derive(Debug)]
pub struct Deadline {
    token: CancellationToken,
    limit: Option<Duration>,
    timer: Option<JoinHandle<()>>,
}

impl Deadline {
    /// Start a deadline; `None` never expires.
    pub fn new(limit: Option<Duration>) -> Self {
        let token = CancellationToken::new();
        let timer = limit.map(|limit| {
            let token = token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(limit).await;
                token.cancel();
            })
        });
        Self { token, limit, timer }
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    /// Resolves when the deadline fires; pending forever when unbounded.
    pub async fn expired(&self) {
        if self.limit.is_some() {
            self.token.cancelled().await;
        } else {
            std::future::pending::<()>().await;
        }
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
#[path = "deadline_tests.rs"]
mod tests;
