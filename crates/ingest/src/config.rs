// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use feedback_core::Tuning;

/// Accepts feedback submissions over HTTP and publishes them to the durable queue.
#[derive(Debug, Parser)]
#[command(name = "feedback-ingest", version, about)]
pub struct Config {
    /// Host address to bind the HTTP listener to.
    #[arg(long, env = "INGEST_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port to listen on.
    #[arg(long, env = "INGEST_PORT", default_value = "8080")]
    pub port: u16,

    /// NATS server URL.
    #[arg(long, env = "NATS_URL", default_value = "nats://127.0.0.1:4222")]
    pub nats_url: String,

    /// JetStream stream name backing the feedback queue.
    #[arg(long, env = "FEEDBACK_STREAM", default_value = "feedback_queue")]
    pub stream_name: String,

    /// Subject new feedback is published to.
    #[arg(long, env = "FEEDBACK_SUBJECT", default_value = "feedback.submitted")]
    pub subject: String,

    /// Log format (json or text).
    #[arg(long, env = "INGEST_LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "INGEST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(flatten)]
    pub tuning: Tuning,
}

impl Config {
    /// Validate configuration beyond what clap's parsing already enforces.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.tuning.validate()?;
        if self.stream_name.trim().is_empty() {
            anyhow::bail!("--stream-name must not be empty");
        }
        if self.subject.trim().is_empty() {
            anyhow::bail!("--subject must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
