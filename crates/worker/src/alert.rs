// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default alert sink: a structured log line. Swapping in a paging or
//! messaging integration only requires a new [`AlertSink`] impl.

use async_trait::async_trait;
use feedback_core::{AlertSink, PortError};

pub struct TracingAlertSink;

#[async_trait]
impl AlertSink for TracingAlertSink {
    async fn send_alert(&self, driver_id: i64, avg_score: f64) -> Result<(), PortError> {
        tracing::warn!(driver_id, avg_score, "driver reputation crossed the alert threshold");
        Ok(())
    }
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
