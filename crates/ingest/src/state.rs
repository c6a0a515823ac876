// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use crate::queue::QueuePublisher;

/// Shared handler state for the ingestion HTTP surface.
pub struct AppState {
    pub queue: QueuePublisher,
}

pub type SharedState = Arc<AppState>;
