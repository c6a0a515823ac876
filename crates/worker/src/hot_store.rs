// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-backed [`HotStore`]. Reputations live in the `driver_scores` hash;
//! alert cooldowns are a `SETEX`-managed key checked with `EXISTS` first, the
//! same two-step shape the original service used.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feedback_core::{DriverReputation, HotStore, PortError};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

const REPUTATION_HASH: &str = "driver_scores";

/// A small round-robin pool of [`ConnectionManager`]s, sized by `--redis-pool-max`.
pub struct RedisHotStore {
    conns: Vec<ConnectionManager>,
    next: AtomicUsize,
}

impl RedisHotStore {
    pub async fn connect(redis_url: &str, pool_max: u32) -> anyhow::Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let pool_size = pool_max.max(1) as usize;
        let mut conns = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            conns.push(client.get_connection_manager().await?);
        }
        Ok(Self { conns, next: AtomicUsize::new(0) })
    }

    fn conn(&self) -> ConnectionManager {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.conns.len();
        self.conns[index].clone()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredReputation {
    avg_score: f64,
    last_updated: DateTime<Utc>,
}

fn alert_lock_key(driver_id: i64) -> String {
    format!("driver_alert_sent:{driver_id}")
}

#[async_trait]
impl HotStore for RedisHotStore {
    async fn get_reputation(&self, driver_id: i64) -> Result<Option<DriverReputation>, PortError> {
        let mut conn = self.conn();
        let raw: Option<String> =
            conn.hget(REPUTATION_HASH, driver_id).await.map_err(anyhow::Error::from)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let stored: StoredReputation = serde_json::from_str(&raw).map_err(anyhow::Error::from)?;
        Ok(Some(DriverReputation { driver_id, avg_score: stored.avg_score, last_updated: stored.last_updated }))
    }

    async fn put_reputation(&self, reputation: &DriverReputation) -> Result<(), PortError> {
        let stored = StoredReputation { avg_score: reputation.avg_score, last_updated: reputation.last_updated };
        let raw = serde_json::to_string(&stored).map_err(anyhow::Error::from)?;
        let mut conn = self.conn();
        let _: () = conn.hset(REPUTATION_HASH, reputation.driver_id, raw).await.map_err(anyhow::Error::from)?;
        Ok(())
    }

    async fn try_acquire_alert_lock(&self, driver_id: i64, ttl_seconds: u64) -> Result<bool, PortError> {
        let key = alert_lock_key(driver_id);
        let mut conn = self.conn();
        let already_locked: bool = conn.exists(&key).await.map_err(anyhow::Error::from)?;
        if already_locked {
            return Ok(false);
        }
        let _: () = conn.set_ex(&key, 1u8, ttl_seconds).await.map_err(anyhow::Error::from)?;
        Ok(true)
    }
}
