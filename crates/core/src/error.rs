// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// Categorizes why a feedback message could not be processed and was
/// routed to the dead-letter queue. Mirrors the `x-error-type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadLetterReason {
    ValidationError,
    DatabaseError,
    UnknownError,
}

impl DeadLetterReason {
    /// Wire-format string used for the `x-error-type` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "validation_error",
            Self::DatabaseError => "database_error",
            Self::UnknownError => "unknown_error",
        }
    }
}

impl std::fmt::Display for DeadLetterReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error surfaced by a [`crate::ports`] implementation. The processor only
/// ever needs to know "did the backend fail", not the backend's own error
/// type, so concrete adapters box their driver errors into this.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
