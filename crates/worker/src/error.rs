// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors the read-model HTTP surface can return to a client.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("driver not found")]
    NotFound,
    #[error("backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, "driver not found".to_owned()),
            Self::Backend(e) => {
                tracing::error!(err = %e, "read-model query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
