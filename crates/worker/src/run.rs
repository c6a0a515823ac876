// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use feedback_core::scorer::Scorer;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::alert::TracingAlertSink;
use crate::config::Config;
use crate::durable_log::PgDurableLog;
use crate::history_api::{get_driver_history, get_driver_score, healthz, readyz};
use crate::hot_store::RedisHotStore;
use crate::queue::{run_consumer, ConsumerConfig};
use crate::state::{AppState, SharedState};

pub fn init_tracing(config: &Config) {
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let result = match config.log_format.as_str() {
        "json" => fmt::fmt().with_env_filter(filter).json().try_init(),
        _ => fmt::fmt().with_env_filter(filter).try_init(),
    };
    drop(result);
}

fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/drivers/{id}/score", get(get_driver_score))
        .route("/drivers/{id}/history", get(get_driver_history))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire up the hot store, durable log, and queue consumer, then serve the
/// read-model HTTP surface until shutdown.
pub async fn run(config: Config) -> anyhow::Result<()> {
    init_tracing(&config);
    config.validate()?;

    let hot_store = Arc::new(RedisHotStore::connect(&config.redis_url, config.redis_pool_max).await?);
    let durable_log =
        Arc::new(PgDurableLog::connect(&config.database_url, config.db_pool_min, config.db_pool_max).await?);
    let alert_sink = TracingAlertSink;
    let scorer = Scorer::new();

    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        shutdown_signal.cancel();
    });

    let consumer_config = ConsumerConfig {
        nats_url: config.nats_url.clone(),
        stream_name: config.stream_name.clone(),
        subject: config.subject.clone(),
        durable_name: config.durable_name.clone(),
        prefetch_count: config.prefetch_count,
        max_deliver: config.max_deliver,
        dlq_stream_name: config.dlq_stream_name.clone(),
        dlq_subject: config.dlq_subject.clone(),
    };

    let consumer_hot_store = hot_store.clone();
    let consumer_durable_log = durable_log.clone();
    let consumer_tuning = config.tuning;
    let consumer_shutdown = shutdown.clone();
    let consumer_task = tokio::spawn(async move {
        if let Err(e) = run_consumer(
            consumer_config,
            scorer,
            consumer_tuning,
            consumer_hot_store.as_ref(),
            consumer_durable_log.as_ref(),
            &alert_sink,
            consumer_shutdown,
        )
        .await
        {
            tracing::error!(err = %e, "feedback consumer exited");
        }
    });

    let state: SharedState = Arc::new(AppState { hot_store, durable_log, tuning: config.tuning });
    let router = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "feedback-worker read model listening");

    axum::serve(listener, router).with_graceful_shutdown(shutdown.cancelled_owned()).await?;
    consumer_task.await?;
    Ok(())
}
