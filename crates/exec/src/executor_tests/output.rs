// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for output capture, encoding, and save files.

use super::{executor, run_async};
use jr_core::JobBuilder;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[yare::parameterized(
    raw = { false, "hi\n" },
    base64 = { true, "aGkK" },
)]
fn output_encoding(base64: bool, expected: &str) {
    run_async(async {
        let mut job = JobBuilder::cmd(&["echo", "hi"]).send_output();
        if base64 {
            job = job.base64();
        }
        let report = executor().execute(&job.build()).await;
        assert_eq!(report.output.as_deref(), Some(expected));
    });
}

#[tokio::test]
async fn base64_preserves_binary_output() {
    let job = JobBuilder::cmd(&["printf", "\\377\\000"]).send_output().base64().build();
    let report = executor().execute(&job).await;
    assert_eq!(report.output.as_deref(), Some("/wA="));
}

#[tokio::test]
async fn base64_without_send_output_is_ignored() {
    let job = JobBuilder::cmd(&["echo", "hi"]).base64().build();
    let report = executor().execute(&job).await;
    assert_eq!(report.output, None);
}

#[tokio::test]
async fn silent_command_yields_empty_output() {
    let job = JobBuilder::cmd(&["true"]).send_output().build();
    let report = executor().execute(&job).await;
    assert_eq!(report.output.as_deref(), Some(""));
}

// ---------------------------------------------------------------------------
// Save files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_only_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let job = JobBuilder::cmd(&["echo", "saved"]).save(&path).build();
    let report = executor().execute(&job).await;
    assert!(report.is_success(), "error = {}", report.error);
    assert_eq!(report.output, None);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "saved\n");
}

#[tokio::test]
async fn save_and_send_duplicates_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let job = JobBuilder::cmd(&["echo", "both"]).save(&path).send_output().base64().build();
    let report = executor().execute(&job).await;
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "both\n");
    assert_eq!(report.output.as_deref(), Some("Ym90aAo="));
}

#[tokio::test]
async fn stderr_never_reaches_save_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let job = JobBuilder::sh("echo out; echo err >&2").save(&path).build();
    let report = executor().execute(&job).await;
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "out\n");
    assert_eq!(report.error, "err\n");
}

#[tokio::test]
async fn unwritable_save_path_aborts_before_running() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let path = dir.path().join("missing").join("out.txt");
    let job = JobBuilder::cmd(&["touch", marker.to_str().unwrap()]).save(&path).build();
    let report = executor().execute(&job).await;
    assert!(report.error.starts_with("failed to create"), "error = {}", report.error);
    assert!(!marker.exists());
}
