// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for bounded main runs.

use super::executor;
use jr_core::JobBuilder;
use std::time::Duration;

const LIMIT: Duration = Duration::from_millis(200);

#[tokio::test]
async fn slow_command_is_killed_at_timeout() {
    let job = JobBuilder::cmd(&["sleep", "5"]).timeout(LIMIT).build();
    let report = executor().execute(&job).await;
    assert_eq!(report.error, "timed out after 200ms");
    assert!(report.duration >= LIMIT);
    assert!(report.duration < Duration::from_secs(3), "duration = {:?}", report.duration);
}

#[tokio::test]
async fn output_before_timeout_is_kept() {
    let job = JobBuilder::sh("echo partial; echo late >&2; exec sleep 5")
        .timeout(LIMIT)
        .send_output()
        .build();
    let report = executor().execute(&job).await;
    assert_eq!(report.output.as_deref(), Some("partial\n"));
    assert_eq!(report.error, "timed out after 200ms\nlate\n");
}

#[tokio::test]
async fn fast_command_finishes_within_timeout() {
    let job = JobBuilder::cmd(&["echo", "quick"]).timeout(Duration::from_secs(5)).send_output().build();
    let report = executor().execute(&job).await;
    assert!(report.is_success(), "error = {}", report.error);
    assert_eq!(report.output.as_deref(), Some("quick\n"));
}

#[tokio::test]
async fn zero_timeout_is_unbounded() {
    let job = JobBuilder::cmd(&["sleep", "0.3"]).timeout(Duration::ZERO).build();
    let report = executor().execute(&job).await;
    assert!(report.is_success(), "error = {}", report.error);
    assert!(report.duration >= Duration::from_millis(300));
}

#[tokio::test]
async fn timeout_kills_forked_descendants() {
    let job = JobBuilder::sh("sleep 3; echo x").timeout(LIMIT).build();

    let began = std::time::Instant::now();
    let report = executor().execute(&job).await;

    assert!(began.elapsed() < Duration::from_secs(1), "wall = {:?}", began.elapsed());
    assert!(report.duration < Duration::from_secs(1), "duration = {:?}", report.duration);
    assert_eq!(report.error, "timed out after 200ms");
    assert_eq!(report.output, None);
}

#[tokio::test]
async fn timeout_kills_every_stage_of_a_pipeline() {
    let job = JobBuilder::sh("echo start; sleep 3 | cat; echo end").timeout(LIMIT).send_output().build();

    let began = std::time::Instant::now();
    let report = executor().execute(&job).await;

    assert!(began.elapsed() < Duration::from_secs(1), "wall = {:?}", began.elapsed());
    assert_eq!(report.output.as_deref(), Some("start\n"));
    assert_eq!(report.error, "timed out after 200ms");
}
