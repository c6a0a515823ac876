// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability traits the processor depends on. The worker binary owns the
//! concrete Redis/Postgres/log adapters; this crate only ever sees `&dyn`.

use async_trait::async_trait;

use crate::error::{DeadLetterReason, PortError};
use crate::types::{DriverReputation, FeedbackEvent, ScoredFeedback};

/// The hot, mutable per-driver reputation store (Redis in production).
#[async_trait]
pub trait HotStore: Send + Sync {
    async fn get_reputation(&self, driver_id: i64) -> Result<Option<DriverReputation>, PortError>;

    async fn put_reputation(&self, reputation: &DriverReputation) -> Result<(), PortError>;

    /// Attempt to acquire the per-driver alert cooldown lock. Returns `true`
    /// if the lock was free and is now held for `ttl_seconds`; `false` if an
    /// alert already fired for this driver within the cooldown window.
    async fn try_acquire_alert_lock(&self, driver_id: i64, ttl_seconds: u64) -> Result<bool, PortError>;
}

/// The durable, append-only feedback log (Postgres in production).
#[async_trait]
pub trait DurableLog: Send + Sync {
    /// Whether a feedback id has already been recorded. Backs idempotency.
    async fn exists(&self, feedback_id: &str) -> Result<bool, PortError>;

    async fn insert(&self, scored: &ScoredFeedback) -> Result<(), PortError>;

    async fn dead_letter(
        &self,
        event: &FeedbackEvent,
        reason: DeadLetterReason,
        detail: &str,
    ) -> Result<(), PortError>;

    /// All scored feedback for a driver, oldest first.
    async fn history_for_driver(&self, driver_id: i64) -> Result<Vec<ScoredFeedback>, PortError>;
}

/// Where an alert goes once a driver's reputation crosses the threshold.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send_alert(&self, driver_id: i64, avg_score: f64) -> Result<(), PortError>;
}
