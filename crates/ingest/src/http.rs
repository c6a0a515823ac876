// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP request/response types and axum handlers for the ingestion surface.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use feedback_core::{EntityType, FeedbackEvent};
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::state::SharedState;

/// `POST /feedback` request body.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub driver_id: i64,
    pub entity_type: EntityType,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    pub feedback_id: String,
}

/// `POST /feedback` — accept free-form feedback and hand it to the queue.
///
/// Returns as soon as the broker has durably stored the message, not once
/// it has been scored — scoring happens asynchronously in the worker.
pub async fn submit_feedback(
    State(state): State<SharedState>,
    Json(req): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<SubmitFeedbackResponse>), IngestError> {
    if req.driver_id <= 0 {
        return Err(IngestError::BadRequest("driver_id must be positive".to_owned()));
    }
    if req.text.trim().is_empty() {
        return Err(IngestError::BadRequest("text must not be empty".to_owned()));
    }

    let feedback_id = uuid::Uuid::new_v4().to_string();
    let event = FeedbackEvent {
        feedback_id: feedback_id.clone(),
        driver_id: req.driver_id,
        entity_type: req.entity_type,
        text: req.text,
        timestamp: Utc::now(),
    };

    state.queue.publish(&event).await.map_err(IngestError::Queue)?;

    Ok((StatusCode::ACCEPTED, Json(SubmitFeedbackResponse { feedback_id })))
}

/// `GET /healthz` — process liveness, no dependency checks.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — reports ready once the queue connection was established
/// at startup; the handler itself does not re-probe the broker.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
