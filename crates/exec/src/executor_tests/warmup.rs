// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the silent warm-up run.

use super::executor;
use jr_core::JobBuilder;
use std::time::Duration;

#[tokio::test]
async fn failing_warm_up_skips_real_run() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path().display();
    // First invocation fails; a second one would leave `second` behind.
    let script = format!("test -e {d}/first || {{ touch {d}/first; exit 1; }}; touch {d}/second");
    let job = JobBuilder::sh(&script).run_twice().send_output().build();

    let report = executor().execute(&job).await;

    assert_eq!(report.error, "error on first run: exit status 1");
    assert_eq!(report.output, None);
    assert!(dir.path().join("first").exists());
    assert!(!dir.path().join("second").exists());
}

#[tokio::test]
async fn warm_up_output_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("runs");
    let script = format!("echo run >> {}; echo out; echo noise >&2", log.display());
    let job = JobBuilder::sh(&script).run_twice().send_output().build();

    let report = executor().execute(&job).await;

    assert_eq!(std::fs::read_to_string(&log).unwrap(), "run\nrun\n");
    assert_eq!(report.output.as_deref(), Some("out\n"));
    assert_eq!(report.error, "noise\n");
}

#[tokio::test]
async fn warm_up_is_not_bound_by_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("warm");
    // Slow on the first invocation only.
    let script = format!("test -e {m} && exit 0; touch {m}; sleep 1", m = marker.display());
    let job = JobBuilder::sh(&script).run_twice().timeout(Duration::from_millis(300)).build();

    let report = executor().execute(&job).await;

    assert!(report.is_success(), "error = {}", report.error);
    assert!(report.duration < Duration::from_millis(300));
}

#[tokio::test]
async fn warm_up_spawn_failure_is_prefixed() {
    let job = JobBuilder::cmd(&["nonexistent_command_xyz_12345"]).run_twice().build();
    let report = executor().execute(&job).await;
    assert!(
        report.error.starts_with("error on first run: failed to spawn"),
        "error = {}",
        report.error
    );
}
