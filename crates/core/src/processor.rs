// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport-agnostic orchestration for a single feedback event. The worker
//! binary's NATS consumer loop calls [`process_event`] per message and maps
//! the outcome to ack / nak / dead-letter; nothing in here knows about NATS.

use crate::config::Tuning;
use crate::error::{DeadLetterReason, PortError};
use crate::ports::{AlertSink, DurableLog, HotStore};
use crate::reputation::ema;
use crate::scorer::Scorer;
use crate::types::{DriverReputation, FeedbackEvent, ScoredFeedback};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Port(#[from] PortError),
}

/// Result of running one event through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Scored, persisted, and (if the threshold and cooldown allowed it)
    /// alerted on.
    Processed { scored: ScoredFeedback, new_avg: f64, alerted: bool },
    /// `feedback_id` was already in the durable log; no-op, ack and move on.
    Duplicate,
    /// Failed validation and was written to the dead-letter path instead of
    /// the live log.
    Rejected { reason: DeadLetterReason },
}

fn validate(event: &FeedbackEvent) -> Option<DeadLetterReason> {
    if event.feedback_id.trim().is_empty() || event.driver_id <= 0 || event.text.trim().is_empty() {
        return Some(DeadLetterReason::ValidationError);
    }
    None
}

/// Run one feedback event through validation, idempotency, scoring,
/// reputation smoothing, persistence, and alerting.
///
/// Errors from `hot_store`/`durable_log`/`alert_sink` propagate as-is so the
/// caller can nak the message for redelivery; only validation failures are
/// handled here, by routing to the dead-letter path and returning `Ok`.
pub async fn process_event(
    event: &FeedbackEvent,
    scorer: &Scorer,
    tuning: &Tuning,
    hot_store: &dyn HotStore,
    durable_log: &dyn DurableLog,
    alert_sink: &dyn AlertSink,
) -> Result<ProcessOutcome, ProcessError> {
    if let Some(reason) = validate(event) {
        durable_log.dead_letter(event, reason, "event failed validation").await?;
        return Ok(ProcessOutcome::Rejected { reason });
    }

    if durable_log.exists(&event.feedback_id).await? {
        return Ok(ProcessOutcome::Duplicate);
    }

    let sentiment_score = scorer.score(&event.text, tuning.fuzzy_enabled, tuning.fuzzy_threshold);

    let prior = hot_store
        .get_reputation(event.driver_id)
        .await?
        .unwrap_or_else(|| DriverReputation::seed(event.driver_id, event.timestamp));

    let new_avg = ema(prior.avg_score, sentiment_score, tuning.ema_alpha);
    let reputation =
        DriverReputation { driver_id: event.driver_id, avg_score: new_avg, last_updated: event.timestamp };
    hot_store.put_reputation(&reputation).await?;

    let scored = ScoredFeedback {
        feedback_id: event.feedback_id.clone(),
        driver_id: event.driver_id,
        entity_type: event.entity_type,
        text: event.text.clone(),
        timestamp: event.timestamp,
        sentiment_score,
    };
    durable_log.insert(&scored).await?;

    let mut alerted = false;
    if new_avg < tuning.alert_threshold {
        let cooldown = tuning.cooldown_seconds();
        if hot_store.try_acquire_alert_lock(event.driver_id, cooldown).await? {
            alert_sink.send_alert(event.driver_id, new_avg).await?;
            alerted = true;
        }
    }

    Ok(ProcessOutcome::Processed { scored, new_avg, alerted })
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
