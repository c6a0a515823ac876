// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire and persisted shapes for the feedback pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of entity a piece of feedback targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Driver,
    Trip,
    App,
    Marshal,
}

/// Immutable feedback submitted by a client. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub feedback_id: String,
    pub driver_id: i64,
    pub entity_type: EntityType,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A [`FeedbackEvent`] after scoring, as written to the durable log exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFeedback {
    pub feedback_id: String,
    pub driver_id: i64,
    pub entity_type: EntityType,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub sentiment_score: f64,
}

/// Hot, mutable per-driver reputation. Absent entries default to `avg_score = 3.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverReputation {
    pub driver_id: i64,
    pub avg_score: f64,
    pub last_updated: DateTime<Utc>,
}

impl DriverReputation {
    /// Neutral anchor used when a driver has no reputation entry yet.
    pub const NEUTRAL_ANCHOR: f64 = 3.0;

    pub fn seed(driver_id: i64, at: DateTime<Utc>) -> Self {
        Self { driver_id, avg_score: Self::NEUTRAL_ANCHOR, last_updated: at }
    }
}

/// Externally managed driver record. Read-only from the pipeline's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: i64,
    pub name: String,
}

/// Read-model combining a driver's live reputation with alert status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverScore {
    pub driver_id: i64,
    pub driver_name: String,
    pub avg_score: f64,
    pub last_updated: DateTime<Utc>,
    pub alert_status: bool,
}

/// One point on a replayed EMA timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub timestamp: DateTime<Utc>,
    pub avg_score: f64,
}

/// Output of the History Reconstructor: raw records plus a replayed timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverHistory {
    pub driver_id: i64,
    pub feedback_records: Vec<ScoredFeedback>,
    pub score_timeline: Vec<ScorePoint>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
