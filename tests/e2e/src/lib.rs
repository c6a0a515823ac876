// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness for end-to-end pipeline scenarios. Runs the real
//! `process_event` orchestration against `feedback_core`'s in-memory fakes —
//! no NATS, Redis, or Postgres required.

use chrono::Utc;
use feedback_core::scorer::Scorer;
use feedback_core::testing::{InMemoryAlertSink, InMemoryDurableLog, InMemoryHotStore};
use feedback_core::{process_event, EntityType, FeedbackEvent, ProcessError, ProcessOutcome, Tuning};

pub struct Pipeline {
    pub scorer: Scorer,
    pub tuning: Tuning,
    pub hot_store: InMemoryHotStore,
    pub durable_log: InMemoryDurableLog,
    pub alert_sink: InMemoryAlertSink,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            scorer: Scorer::new(),
            tuning: Tuning::default(),
            hot_store: InMemoryHotStore::new(),
            durable_log: InMemoryDurableLog::new(),
            alert_sink: InMemoryAlertSink::new(),
        }
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        Self { tuning, ..Self::new() }
    }

    pub async fn submit(
        &self,
        feedback_id: &str,
        driver_id: i64,
        text: &str,
    ) -> Result<ProcessOutcome, ProcessError> {
        let event = FeedbackEvent {
            feedback_id: feedback_id.to_owned(),
            driver_id,
            entity_type: EntityType::Driver,
            text: text.to_owned(),
            timestamp: Utc::now(),
        };
        process_event(&event, &self.scorer, &self.tuning, &self.hot_store, &self.durable_log, &self.alert_sink).await
    }
}
