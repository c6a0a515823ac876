// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use feedback_core::{DurableLog, HotStore, Tuning};

/// Shared handler state for the worker's read-model HTTP surface.
pub struct AppState {
    pub hot_store: Arc<dyn HotStore>,
    pub durable_log: Arc<dyn DurableLog>,
    pub tuning: Tuning,
}

pub type SharedState = Arc<AppState>;
