// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fakes for the port traits. Used by this crate's own processor
//! tests, by the worker crate's unit tests, and by the end-to-end suite —
//! none of them need a real Redis/Postgres/NATS to exercise the pipeline.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use parking_lot::Mutex as PLMutex;

use crate::error::{DeadLetterReason, PortError};
use crate::ports::{AlertSink, DurableLog, HotStore};
use crate::types::{DriverReputation, FeedbackEvent, ScoredFeedback};

/// A dead-lettered message captured by [`InMemoryDurableLog`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeadLetter {
    pub event: FeedbackEvent,
    pub reason: DeadLetterReason,
    pub detail: String,
}

#[derive(Default)]
pub struct InMemoryHotStore {
    reputations: Mutex<HashMap<i64, DriverReputation>>,
    alert_locks: Mutex<HashSet<i64>>,
}

impl InMemoryHotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, reputation: DriverReputation) {
        self.reputations.lock().unwrap_or_else(|e| e.into_inner()).insert(reputation.driver_id, reputation);
    }
}

#[async_trait]
impl HotStore for InMemoryHotStore {
    async fn get_reputation(&self, driver_id: i64) -> Result<Option<DriverReputation>, PortError> {
        Ok(self.reputations.lock().unwrap_or_else(|e| e.into_inner()).get(&driver_id).copied())
    }

    async fn put_reputation(&self, reputation: &DriverReputation) -> Result<(), PortError> {
        self.reputations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(reputation.driver_id, *reputation);
        Ok(())
    }

    async fn try_acquire_alert_lock(&self, driver_id: i64, _ttl_seconds: u64) -> Result<bool, PortError> {
        Ok(self.alert_locks.lock().unwrap_or_else(|e| e.into_inner()).insert(driver_id))
    }
}

#[derive(Default)]
pub struct InMemoryDurableLog {
    rows: PLMutex<Vec<ScoredFeedback>>,
    seen_ids: PLMutex<HashSet<String>>,
    dead_letters: PLMutex<Vec<DeadLetter>>,
}

impl InMemoryDurableLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<ScoredFeedback> {
        self.rows.lock().clone()
    }

    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.dead_letters.lock().clone()
    }
}

#[async_trait]
impl DurableLog for InMemoryDurableLog {
    async fn exists(&self, feedback_id: &str) -> Result<bool, PortError> {
        Ok(self.seen_ids.lock().contains(feedback_id))
    }

    async fn insert(&self, scored: &ScoredFeedback) -> Result<(), PortError> {
        self.seen_ids.lock().insert(scored.feedback_id.clone());
        self.rows.lock().push(scored.clone());
        Ok(())
    }

    async fn dead_letter(
        &self,
        event: &FeedbackEvent,
        reason: DeadLetterReason,
        detail: &str,
    ) -> Result<(), PortError> {
        self.dead_letters.lock().push(DeadLetter {
            event: event.clone(),
            reason,
            detail: detail.to_owned(),
        });
        Ok(())
    }

    async fn history_for_driver(&self, driver_id: i64) -> Result<Vec<ScoredFeedback>, PortError> {
        let mut rows: Vec<ScoredFeedback> =
            self.rows.lock().iter().filter(|r| r.driver_id == driver_id).cloned().collect();
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }
}

/// An alert captured by [`InMemoryAlertSink`] instead of actually being sent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentAlert {
    pub driver_id: i64,
    pub avg_score: f64,
}

#[derive(Default)]
pub struct InMemoryAlertSink {
    sent: PLMutex<Vec<SentAlert>>,
}

impl InMemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentAlert> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl AlertSink for InMemoryAlertSink {
    async fn send_alert(&self, driver_id: i64, avg_score: f64) -> Result<(), PortError> {
        self.sent.lock().push(SentAlert { driver_id, avg_score });
        Ok(())
    }
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod tests;
