// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hands completed batches to the transport.

use jr_adapters::{Transport, TransportError};
use thiserror::Error;

use crate::aggregator::Flush;

/// Errors from reporting a batch. Never fatal to a run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no destination url for batch `{label}`")]
    NoDestination { label: String },
    #[error("failed to send batch `{label}` to {url}: {source}")]
    Transport {
        label: String,
        url: String,
        #[source]
        source: TransportError,
    },
}

/// Serializes batches and sends them through a [`Transport`].
#[derive(Debug, Clone)]
pub struct BatchReporter<T> {
    transport: T,
}

impl<T: Transport> BatchReporter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send one batch to its resolved destination.
    pub async fn report(&self, flush: &Flush) -> Result<(), ReportError> {
        let label = &flush.batch.label;
        let Some(url) = flush.destination.as_deref() else {
            return Err(ReportError::NoDestination { label: label.clone() });
        };
        tracing::info!(%label, %url, reports = flush.batch.len(), "sending batch");
        self.transport.send(url, &flush.batch).await.map_err(|source| ReportError::Transport {
            label: label.clone(),
            url: url.to_string(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
