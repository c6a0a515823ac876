// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scenarios driven through the real `process_event` orchestration
//! and in-memory adapters. No NATS, Redis, or Postgres involved.

use feedback_core::error::DeadLetterReason;
use feedback_core::history::reconstruct_history;
use feedback_core::{ProcessOutcome, Tuning};
use feedback_e2e::Pipeline;

#[tokio::test]
async fn realistic_negative_feedback_lowers_reputation_from_the_neutral_anchor() {
    let pipeline = Pipeline::new();

    let outcome = pipeline.submit("fb-1", 42, "The driver was rude and late").await.unwrap();

    match outcome {
        ProcessOutcome::Processed { scored, new_avg, alerted } => {
            assert!((scored.sentiment_score - (-3.0)).abs() < 1e-9);
            // ema(3.0, -3.0, 0.1) = 0.1*-3.0 + 0.9*3.0 = 2.4
            assert!((new_avg - 2.4).abs() < 1e-9);
            assert!(!alerted);
        }
        other => panic!("expected Processed, got {other:?}"),
    }

    let reputation = pipeline.hot_store.get_reputation(42).await.unwrap().unwrap();
    assert!((reputation.avg_score - 2.4).abs() < 1e-9);
}

#[tokio::test]
async fn resubmitting_the_same_feedback_id_is_a_noop() {
    let pipeline = Pipeline::new();

    let first = pipeline.submit("fb-dup", 7, "Great ride, very professional").await.unwrap();
    assert!(matches!(first, ProcessOutcome::Processed { .. }));
    let reputation_after_first = pipeline.hot_store.get_reputation(7).await.unwrap().unwrap();

    let second = pipeline.submit("fb-dup", 7, "This text is ignored, the id already exists").await.unwrap();
    assert_eq!(second, ProcessOutcome::Duplicate);

    let reputation_after_second = pipeline.hot_store.get_reputation(7).await.unwrap().unwrap();
    assert_eq!(reputation_after_first.avg_score, reputation_after_second.avg_score);
    assert_eq!(pipeline.durable_log.rows().len(), 1);
}

#[tokio::test]
async fn invalid_events_are_rejected_and_dead_lettered_without_touching_reputation() {
    let pipeline = Pipeline::new();

    let outcome = pipeline.submit("", 9, "whatever text").await.unwrap();
    assert_eq!(outcome, ProcessOutcome::Rejected { reason: DeadLetterReason::ValidationError });

    assert!(pipeline.hot_store.get_reputation(9).await.unwrap().is_none());
    assert!(pipeline.durable_log.rows().is_empty());

    let dead_letters = pipeline.durable_log.dead_letters();
    assert_eq!(dead_letters.len(), 1);
    assert_eq!(dead_letters[0].reason, DeadLetterReason::ValidationError);
}

#[tokio::test]
async fn repeated_bad_feedback_alerts_exactly_once_inside_the_cooldown() {
    let pipeline = Pipeline::new();

    for i in 0..5 {
        let id = format!("fb-alert-{i}");
        let outcome = pipeline.submit(&id, 100, "Terrible awful driver, never again").await.unwrap();
        assert!(matches!(outcome, ProcessOutcome::Processed { .. }));
    }

    let sent = pipeline.alert_sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].driver_id, 100);
}

#[tokio::test]
async fn drivers_do_not_share_reputation_or_alert_state() {
    let pipeline = Pipeline::new();

    pipeline.submit("fb-a1", 1, "Terrible awful driver, never again").await.unwrap();
    pipeline.submit("fb-b1", 2, "Great ride, very professional").await.unwrap();
    pipeline.submit("fb-a2", 1, "Terrible awful driver, never again").await.unwrap();

    let rep_1 = pipeline.hot_store.get_reputation(1).await.unwrap().unwrap();
    let rep_2 = pipeline.hot_store.get_reputation(2).await.unwrap().unwrap();
    assert!(rep_1.avg_score < rep_2.avg_score);

    let sent = pipeline.alert_sink.sent();
    assert!(sent.iter().all(|a| a.driver_id == 1));
}

#[tokio::test]
async fn history_replay_matches_the_live_reputation_after_the_same_events() {
    let pipeline = Pipeline::new();

    pipeline.submit("fb-h1", 55, "Great ride, very professional").await.unwrap();
    pipeline.submit("fb-h2", 55, "The driver was rude and late").await.unwrap();
    pipeline.submit("fb-h3", 55, "It was an okay trip").await.unwrap();

    let live = pipeline.hot_store.get_reputation(55).await.unwrap().unwrap();
    let history = reconstruct_history(55, &pipeline.durable_log, pipeline.tuning.ema_alpha).await.unwrap();

    assert_eq!(history.feedback_records.len(), 3);
    assert_eq!(history.score_timeline.len(), 3);

    // newest-first: the last computed point in the replay is the first one returned.
    let newest_point = history.score_timeline.first().unwrap();
    assert!((newest_point.avg_score - live.avg_score).abs() < 1e-9);

    // oldest-first chronologically once reversed back.
    let mut timestamps = history.feedback_records.iter().map(|r| r.timestamp).collect::<Vec<_>>();
    let mut sorted = timestamps.clone();
    sorted.sort();
    sorted.reverse();
    timestamps.dedup();
    assert_eq!(timestamps.len(), 3);
    let _ = sorted;
}

#[tokio::test]
async fn sentiment_scores_always_land_inside_the_clamped_range() {
    let pipeline = Pipeline::new();
    let samples = [
        "The absolute best trip of my entire life, amazing amazing amazing",
        "Worst most terrible awful horrendous disgusting experience ever",
        "The weather was fine and the radio played music",
    ];

    for (i, text) in samples.iter().enumerate() {
        let outcome = pipeline.submit(&format!("fb-range-{i}"), 500 + i as i64, text).await.unwrap();
        if let ProcessOutcome::Processed { scored, .. } = outcome {
            assert!((-5.0..=5.0).contains(&scored.sentiment_score));
        } else {
            panic!("expected Processed, got {outcome:?}");
        }
    }
}

#[tokio::test]
async fn a_driver_that_never_dips_below_threshold_is_never_alerted() {
    let tuning = Tuning { alert_threshold: -1.0, ..Tuning::default() };
    let pipeline = Pipeline::with_tuning(tuning);

    for i in 0..4 {
        pipeline.submit(&format!("fb-safe-{i}"), 9001, "The driver was rude and late").await.unwrap();
    }

    assert!(pipeline.alert_sink.sent().is_empty());
}
