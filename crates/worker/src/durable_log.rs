// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Postgres-backed [`DurableLog`]. Append-only: `insert` is idempotent via a
//! primary key conflict so a redelivered message is never recorded twice.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feedback_core::{DeadLetterReason, DurableLog, EntityType, FeedbackEvent, PortError, ScoredFeedback};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const STATEMENT_TIMEOUT: Duration = Duration::from_secs(60);

pub struct PgDurableLog {
    pool: PgPool,
}

impl PgDurableLog {
    pub async fn connect(database_url: &str, pool_min: u32, pool_max: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(pool_min)
            .max_connections(pool_max)
            .acquire_timeout(STATEMENT_TIMEOUT)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

fn entity_type_str(t: EntityType) -> &'static str {
    match t {
        EntityType::Driver => "driver",
        EntityType::Trip => "trip",
        EntityType::App => "app",
        EntityType::Marshal => "marshal",
    }
}

fn entity_type_from_str(s: &str) -> EntityType {
    match s {
        "trip" => EntityType::Trip,
        "app" => EntityType::App,
        "marshal" => EntityType::Marshal,
        _ => EntityType::Driver,
    }
}

#[derive(sqlx::FromRow)]
struct ScoredFeedbackRow {
    feedback_id: String,
    driver_id: i64,
    entity_type: String,
    text: String,
    timestamp: DateTime<Utc>,
    sentiment_score: f64,
}

impl From<ScoredFeedbackRow> for ScoredFeedback {
    fn from(row: ScoredFeedbackRow) -> Self {
        Self {
            feedback_id: row.feedback_id,
            driver_id: row.driver_id,
            entity_type: entity_type_from_str(&row.entity_type),
            text: row.text,
            timestamp: row.timestamp,
            sentiment_score: row.sentiment_score,
        }
    }
}

#[async_trait]
impl DurableLog for PgDurableLog {
    async fn exists(&self, feedback_id: &str) -> Result<bool, PortError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM feedback_log WHERE feedback_id = $1")
            .bind(feedback_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(anyhow::Error::from)?;
        Ok(row.is_some())
    }

    async fn insert(&self, scored: &ScoredFeedback) -> Result<(), PortError> {
        sqlx::query(
            "INSERT INTO feedback_log (feedback_id, driver_id, entity_type, feedback_text, created_at, sentiment_score)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (feedback_id) DO NOTHING",
        )
        .bind(&scored.feedback_id)
        .bind(scored.driver_id)
        .bind(entity_type_str(scored.entity_type))
        .bind(&scored.text)
        .bind(scored.timestamp)
        .bind(scored.sentiment_score)
        .execute(&self.pool)
        .await
        .map_err(anyhow::Error::from)?;
        Ok(())
    }

    async fn dead_letter(
        &self,
        event: &FeedbackEvent,
        reason: DeadLetterReason,
        detail: &str,
    ) -> Result<(), PortError> {
        sqlx::query(
            "INSERT INTO dead_letters (feedback_id, driver_id, entity_type, text, event_timestamp, reason, detail)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&event.feedback_id)
        .bind(event.driver_id)
        .bind(entity_type_str(event.entity_type))
        .bind(&event.text)
        .bind(event.timestamp)
        .bind(reason.as_str())
        .bind(detail)
        .execute(&self.pool)
        .await
        .map_err(anyhow::Error::from)?;
        Ok(())
    }

    async fn history_for_driver(&self, driver_id: i64) -> Result<Vec<ScoredFeedback>, PortError> {
        let rows: Vec<ScoredFeedbackRow> = sqlx::query_as(
            "SELECT feedback_id, driver_id, entity_type, feedback_text AS text, created_at AS timestamp, sentiment_score
             FROM feedback_log WHERE driver_id = $1 ORDER BY created_at ASC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await
        .map_err(anyhow::Error::from)?;
        Ok(rows.into_iter().map(ScoredFeedback::from).collect())
    }
}
