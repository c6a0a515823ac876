// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use feedback_core::Tuning;

/// Consumes queued feedback, scores it, and maintains driver reputations.
#[derive(Debug, Parser)]
#[command(name = "feedback-worker", version, about)]
pub struct Config {
    /// NATS server URL.
    #[arg(long, env = "NATS_URL", default_value = "nats://127.0.0.1:4222")]
    pub nats_url: String,

    /// JetStream stream name backing the feedback queue.
    #[arg(long, env = "FEEDBACK_STREAM", default_value = "feedback_queue")]
    pub stream_name: String,

    /// Subject new feedback is published to.
    #[arg(long, env = "FEEDBACK_SUBJECT", default_value = "feedback.submitted")]
    pub subject: String,

    /// Durable pull consumer name.
    #[arg(long, env = "FEEDBACK_CONSUMER", default_value = "feedback-worker")]
    pub durable_name: String,

    /// Maximum number of unacked messages outstanding at once.
    #[arg(long, env = "FEEDBACK_PREFETCH", default_value = "10")]
    pub prefetch_count: u32,

    /// Delivery attempts before a message is routed to the dead-letter stream.
    #[arg(long, env = "FEEDBACK_MAX_DELIVER", default_value = "5")]
    pub max_deliver: i64,

    /// JetStream stream name backing the dead-letter queue.
    #[arg(long, env = "FEEDBACK_DLQ_STREAM", default_value = "feedback_dlq")]
    pub dlq_stream_name: String,

    /// Subject dead-lettered messages are published to.
    #[arg(long, env = "FEEDBACK_DLQ_SUBJECT", default_value = "feedback.dead_letter")]
    pub dlq_subject: String,

    /// Redis URL for the hot reputation store.
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Postgres connection string for the durable log.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Minimum size of the Postgres connection pool.
    #[arg(long, env = "DB_POOL_MIN", default_value = "5")]
    pub db_pool_min: u32,

    /// Maximum size of the Postgres connection pool.
    #[arg(long, env = "DB_POOL_MAX", default_value = "20")]
    pub db_pool_max: u32,

    /// Maximum size of the Redis connection pool.
    #[arg(long, env = "REDIS_POOL_MAX", default_value = "50")]
    pub redis_pool_max: u32,

    /// Host address for the read-model HTTP surface.
    #[arg(long, env = "WORKER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the read-model HTTP surface.
    #[arg(long, env = "WORKER_PORT", default_value = "8081")]
    pub port: u16,

    /// Log format (json or text).
    #[arg(long, env = "WORKER_LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "WORKER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(flatten)]
    pub tuning: Tuning,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.tuning.validate()?;
        if self.prefetch_count == 0 {
            anyhow::bail!("--prefetch-count must be at least 1");
        }
        if self.max_deliver < 1 {
            anyhow::bail!("--max-deliver must be at least 1");
        }
        if self.database_url.trim().is_empty() {
            anyhow::bail!("--database-url must not be empty");
        }
        if self.db_pool_min == 0 || self.db_pool_min > self.db_pool_max {
            anyhow::bail!("--db-pool-min must be at least 1 and no greater than --db-pool-max");
        }
        if self.redis_pool_max == 0 {
            anyhow::bail!("--redis-pool-max must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
