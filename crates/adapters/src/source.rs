// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job list retrieval.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use jr_core::JobList;
use thiserror::Error;

/// Errors from fetching or decoding a job list
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not fetch jobs from {url}: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("job source {url} returned {status}")]
    Status { url: String, status: u16 },
    #[error("could not read jobs from {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse job list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the job list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    /// `http://` or `https://` URL, fetched with GET
    Http(String),
    /// Local path or `file://` URL
    File(PathBuf),
}

impl JobSource {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            return JobSource::Http(location.to_string());
        }
        let path = location.strip_prefix("file://").unwrap_or(location);
        JobSource::File(PathBuf::from(path))
    }

    /// Fetch and decode the job list.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<JobList, SourceError> {
        let body = match self {
            JobSource::Http(url) => {
                let http_err = |source| SourceError::Http { url: url.clone(), source };
                let response = client.get(url).send().await.map_err(http_err)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status { url: url.clone(), status: status.as_u16() });
                }
                response.bytes().await.map_err(http_err)?.to_vec()
            }
            JobSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|source| SourceError::Read { path: path.clone(), source })?,
        };
        let jobs: JobList = serde_json::from_slice(&body)?;
        tracing::info!(source = %self, jobs = jobs.len(), "fetched job list");
        Ok(jobs)
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobSource::Http(url) => write!(f, "{url}"),
            JobSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// HTTP client shared by the job source and the transport.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("jobrunner/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
