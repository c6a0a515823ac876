// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rebuilds a driver's reputation timeline from the durable log alone — the
//! hot store is never consulted here, so a wiped or cold Redis never loses
//! history, only the live cache.

use crate::error::PortError;
use crate::ports::DurableLog;
use crate::reputation::ema;
use crate::types::{DriverHistory, DriverReputation, ScorePoint};

/// Replay a driver's scored feedback oldest-first through the same EMA used
/// live, starting from the neutral anchor, then present both lists
/// newest-first to match the read model's ordering.
pub async fn reconstruct_history(
    driver_id: i64,
    durable_log: &dyn DurableLog,
    ema_alpha: f64,
) -> Result<DriverHistory, PortError> {
    let mut rows = durable_log.history_for_driver(driver_id).await?;
    rows.sort_by_key(|r| r.timestamp);

    let mut avg = DriverReputation::NEUTRAL_ANCHOR;
    let mut timeline = Vec::with_capacity(rows.len());
    for row in &rows {
        avg = ema(avg, row.sentiment_score, ema_alpha);
        timeline.push(ScorePoint { timestamp: row.timestamp, avg_score: avg });
    }

    rows.reverse();
    timeline.reverse();
    Ok(DriverHistory { driver_id, feedback_records: rows, score_timeline: timeline })
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
