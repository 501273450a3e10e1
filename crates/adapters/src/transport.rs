// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use thiserror::Error;

/// Errors from transport operations
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("collector returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Adapter for delivering a serialized payload to a collector
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Send `payload` to `url`, returning the collector's response body
    async fn send<T>(&self, url: &str, payload: &T) -> Result<String, TransportError>
    where
        T: Serialize + Sync + ?Sized;
}

/// Sends payloads as pretty-printed JSON over HTTP POST with basic auth.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    user: String,
    credential: String,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, user: impl Into<String>, credential: impl Into<String>) -> Self {
        Self { client, user: user.into(), credential: credential.into() }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send<T>(&self, url: &str, payload: &T) -> Result<String, TransportError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_vec_pretty(payload)?;
        tracing::debug!(%url, bytes = body.len(), "posting payload");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .basic_auth(&self.user, Some(&self.credential))
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::info!(%url, status = status.as_u16(), response = %text, "collector responded");
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

/// Writes payloads to stdout instead of sending them (dry runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutTransport;

#[async_trait]
impl Transport for StdoutTransport {
    async fn send<T>(&self, url: &str, payload: &T) -> Result<String, TransportError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_string_pretty(payload)?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{body}")?;
        tracing::info!(%url, "dry run, payload printed");
        Ok(String::new())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Transport, TransportError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde::Serialize;
    use std::collections::HashSet;
    use std::sync::Arc;

    /// Recorded payload
    #[derive(Debug, Clone)]
    pub struct SentPayload {
        pub url: String,
        pub body: serde_json::Value,
    }

    #[derive(Default)]
    struct FakeTransportState {
        sent: Vec<SentPayload>,
        failing: HashSet<String>,
    }

    /// Fake transport for testing
    #[derive(Clone, Default)]
    pub struct FakeTransport {
        inner: Arc<Mutex<FakeTransportState>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every send to `url` fail with a 500 (still recorded)
        pub fn fail_url(&self, url: &str) {
            self.inner.lock().failing.insert(url.to_string());
        }

        /// Get all recorded payloads, in send order
        pub fn sent(&self) -> Vec<SentPayload> {
            self.inner.lock().sent.clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send<T>(&self, url: &str, payload: &T) -> Result<String, TransportError>
        where
            T: Serialize + Sync + ?Sized,
        {
            let body = serde_json::to_value(payload)?;
            let mut inner = self.inner.lock();
            inner.sent.push(SentPayload { url: url.to_string(), body });
            if inner.failing.contains(url) {
                return Err(TransportError::Status { status: 500, body: "unavailable".to_string() });
            }
            Ok("ok".to_string())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTransport, SentPayload};

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
