// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors the ingestion HTTP surface can return to a client.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("{0}")]
    BadRequest(String),
    #[error("queue unavailable: {0}")]
    Queue(#[from] anyhow::Error),
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Queue(e) => {
                tracing::error!(err = %e, "failed to publish feedback event");
                (StatusCode::SERVICE_UNAVAILABLE, "feedback queue unavailable".to_owned())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
