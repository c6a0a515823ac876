// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tuning knobs shared by the ingestion and worker binaries.
//!
//! Each binary's `Config` flattens [`Tuning`] in via `#[command(flatten)]` so
//! the range invariants below are validated once, the same way regardless of
//! which binary parsed them.

use serde::{Deserialize, Serialize};

/// Scoring and alerting parameters. See spec §6 for defaults and ranges.
#[derive(Debug, Clone, Copy, PartialEq, clap::Args, Serialize, Deserialize)]
pub struct Tuning {
    /// EMA smoothing factor, 0 < alpha <= 1.
    #[arg(long, env = "EMA_ALPHA", default_value = "0.1")]
    pub ema_alpha: f64,

    /// Score below which a driver is considered in an alert state.
    #[arg(long, env = "ALERT_THRESHOLD", default_value = "2.5")]
    pub alert_threshold: f64,

    /// Hours an alert lock suppresses further alerts for the same driver.
    #[arg(long, env = "ALERT_COOLDOWN_HOURS", default_value = "24")]
    pub alert_cooldown_hours: u32,

    /// Whether the scorer may fall back to approximate lexicon matches.
    #[arg(long, env = "FUZZY_ENABLED", default_value = "true")]
    pub fuzzy_enabled: bool,

    /// Minimum similarity ratio for an approximate lexicon match to count.
    #[arg(long, env = "FUZZY_THRESHOLD", default_value = "0.85")]
    pub fuzzy_threshold: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ema_alpha: 0.1,
            alert_threshold: 2.5,
            alert_cooldown_hours: 24,
            fuzzy_enabled: true,
            fuzzy_threshold: 0.85,
        }
    }
}

/// Errors produced by [`Tuning::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("ema_alpha must be in (0, 1], got {0}")]
    EmaAlpha(f64),
    #[error("alert_threshold must be in [-5, 5], got {0}")]
    AlertThreshold(f64),
    #[error("alert_cooldown_hours must be in [1, 168], got {0}")]
    AlertCooldownHours(u32),
    #[error("fuzzy_threshold must be in [0, 1], got {0}")]
    FuzzyThreshold(f64),
}

impl Tuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.ema_alpha > 0.0 && self.ema_alpha <= 1.0) {
            return Err(TuningError::EmaAlpha(self.ema_alpha));
        }
        if !(-5.0..=5.0).contains(&self.alert_threshold) {
            return Err(TuningError::AlertThreshold(self.alert_threshold));
        }
        if !(1..=168).contains(&self.alert_cooldown_hours) {
            return Err(TuningError::AlertCooldownHours(self.alert_cooldown_hours));
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(TuningError::FuzzyThreshold(self.fuzzy_threshold));
        }
        Ok(())
    }

    /// Alert cooldown expressed in seconds, for TTL-bearing store keys.
    pub fn cooldown_seconds(&self) -> u64 {
        u64::from(self.alert_cooldown_hours) * 3600
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
