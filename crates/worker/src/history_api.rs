// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-model HTTP surface: current driver score and reconstructed history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use feedback_core::{history, DriverHistory, DriverScore};

use crate::error::WorkerError;
use crate::state::SharedState;

/// `GET /drivers/:id/score` — the driver's live reputation from the hot store.
pub async fn get_driver_score(
    State(state): State<SharedState>,
    Path(driver_id): Path<i64>,
) -> Result<Json<DriverScore>, WorkerError> {
    let reputation = state
        .hot_store
        .get_reputation(driver_id)
        .await
        .map_err(|e| WorkerError::Backend(e.into()))?
        .ok_or(WorkerError::NotFound)?;

    Ok(Json(DriverScore {
        driver_id,
        driver_name: String::new(),
        avg_score: reputation.avg_score,
        last_updated: reputation.last_updated,
        alert_status: reputation.avg_score < state.tuning.alert_threshold,
    }))
}

/// `GET /drivers/:id/history` — replay the durable log into a score timeline.
pub async fn get_driver_history(
    State(state): State<SharedState>,
    Path(driver_id): Path<i64>,
) -> Result<Json<DriverHistory>, WorkerError> {
    let history = history::reconstruct_history(driver_id, state.durable_log.as_ref(), state.tuning.ema_alpha)
        .await
        .map_err(|e| WorkerError::Backend(e.into()))?;
    Ok(Json(history))
}

/// `GET /healthz` — process liveness, no dependency checks.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — reports ready once the worker's connections were
/// established at startup.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
