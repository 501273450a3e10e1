// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for background sidecar processes.

use super::executor;
use jr_core::JobBuilder;
use std::time::{Duration, Instant};

const DELAY: Duration = Duration::from_millis(200);

#[tokio::test]
async fn delay_precedes_main_run_and_sidecar_is_reaped() {
    let dir = tempfile::tempdir().unwrap();
    let done = dir.path().join("sidecar-done");
    let script = format!("sleep 0.4; touch {}", done.display());
    let job = JobBuilder::cmd(&["true"]).background(DELAY, &["sh", "-c", &script]).build();

    let began = Instant::now();
    let report = executor().execute(&job).await;

    assert!(began.elapsed() >= DELAY);
    assert!(done.exists(), "sidecar outlived the job");
    assert!(report.is_success(), "error = {}", report.error);
}

#[tokio::test]
async fn duration_excludes_sidecar_delay() {
    let job = JobBuilder::cmd(&["true"]).background(DELAY, &["true"]).build();
    let report = executor().execute(&job).await;
    assert!(report.duration < DELAY, "duration = {:?}", report.duration);
}

#[tokio::test]
async fn sidecar_runs_alongside_main_command() {
    let dir = tempfile::tempdir().unwrap();
    let ready = dir.path().join("ready");
    let sidecar = format!("touch {}; sleep 0.3", ready.display());
    let main = format!("cat {}", ready.display());
    let job = JobBuilder::sh(&main).background(DELAY, &["sh", "-c", &sidecar]).build();

    let report = executor().execute(&job).await;

    assert!(report.is_success(), "error = {}", report.error);
}

#[tokio::test]
async fn sidecar_exit_status_is_ignored() {
    let job = JobBuilder::cmd(&["echo", "ok"]).send_output().background(DELAY, &["false"]).build();
    let report = executor().execute(&job).await;
    assert!(report.is_success(), "error = {}", report.error);
    assert_eq!(report.output.as_deref(), Some("ok\n"));
}

#[tokio::test]
async fn sidecar_spawn_failure_skips_main_run() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let job = JobBuilder::cmd(&["touch", marker.to_str().unwrap()])
        .background(DELAY, &["nonexistent_command_xyz_12345"])
        .build();

    let report = executor().execute(&job).await;

    assert!(
        report.error.starts_with("error starting background process: failed to spawn"),
        "error = {}",
        report.error
    );
    assert!(!marker.exists());
}

#[tokio::test]
async fn background_without_command_is_skipped() {
    let job = JobBuilder::cmd(&["true"]).background(Duration::from_secs(30), &[]).build();
    let began = Instant::now();
    let report = executor().execute(&job).await;
    assert!(began.elapsed() < Duration::from_secs(5));
    assert!(report.is_success());
}

#[tokio::test]
async fn abandoned_job_kills_its_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let done = dir.path().join("sidecar-done");
    let script = format!("sleep 0.6; touch {}", done.display());
    let job = JobBuilder::cmd(&["sleep", "5"]).background(Duration::from_millis(50), &["sh", "-c", &script]).build();

    let abandoned = tokio::time::timeout(Duration::from_millis(300), executor().execute(&job)).await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!done.exists(), "sidecar survived the abandoned job");
}
