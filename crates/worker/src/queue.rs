// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JetStream pull consumer for the feedback queue. Parses each message,
//! hands it to [`feedback_core::process_event`], and acks, naks, or
//! dead-letters it depending on the outcome. Nothing about scoring,
//! reputation, or persistence lives in this file — only transport plumbing.

use async_nats::jetstream;
use async_nats::jetstream::consumer::pull;
use async_nats::HeaderMap;
use bytes::Bytes;
use chrono::Utc;
use feedback_core::scorer::Scorer;
use feedback_core::{process_event, AlertSink, DeadLetterReason, DurableLog, FeedbackEvent, HotStore, ProcessOutcome, Tuning};
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

pub struct ConsumerConfig {
    pub nats_url: String,
    pub stream_name: String,
    pub subject: String,
    pub durable_name: String,
    pub prefetch_count: u32,
    pub max_deliver: i64,
    pub dlq_stream_name: String,
    pub dlq_subject: String,
}

/// Run the pull-consumer loop until `shutdown` fires.
#[allow(clippy::too_many_arguments)]
pub async fn run_consumer(
    config: ConsumerConfig,
    scorer: Scorer,
    tuning: Tuning,
    hot_store: &dyn HotStore,
    durable_log: &dyn DurableLog,
    alert_sink: &dyn AlertSink,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let client = async_nats::connect(&config.nats_url).await?;
    let js = jetstream::new(client);

    js.get_or_create_stream(jetstream::stream::Config {
        name: config.stream_name.clone(),
        subjects: vec![config.subject.clone()],
        ..Default::default()
    })
    .await?;

    js.get_or_create_stream(jetstream::stream::Config {
        name: config.dlq_stream_name.clone(),
        subjects: vec![config.dlq_subject.clone()],
        ..Default::default()
    })
    .await?;

    let stream = js.get_stream(&config.stream_name).await?;
    let consumer = stream
        .get_or_create_consumer(
            &config.durable_name,
            pull::Config {
                durable_name: Some(config.durable_name.clone()),
                max_ack_pending: config.prefetch_count as i64,
                max_deliver: config.max_deliver,
                ..Default::default()
            },
        )
        .await?;

    let mut messages = consumer.messages().await?;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            next = messages.next() => {
                let Some(delivery) = next else { break };
                let message = match delivery {
                    Ok(m) => m,
                    Err(e) => {
                        tracing::warn!(err = %e, "jetstream pull error");
                        continue;
                    }
                };

                let event: FeedbackEvent = match serde_json::from_slice(message.payload.as_ref()) {
                    Ok(e) => e,
                    Err(e) => {
                        publish_dead_letter(
                            &js,
                            &config,
                            None,
                            DeadLetterReason::ValidationError,
                            &e.to_string(),
                            message.payload.clone(),
                        )
                        .await;
                        let _ = message.ack().await;
                        continue;
                    }
                };

                let outcome = process_event(&event, &scorer, &tuning, hot_store, durable_log, alert_sink).await;
                match outcome {
                    Ok(ProcessOutcome::Processed { .. }) | Ok(ProcessOutcome::Duplicate) => {
                        let _ = message.ack().await;
                    }
                    Ok(ProcessOutcome::Rejected { reason }) => {
                        publish_dead_letter(
                            &js,
                            &config,
                            Some(&event),
                            reason,
                            "event failed validation",
                            message.payload.clone(),
                        )
                        .await;
                        let _ = message.ack().await;
                    }
                    Err(e) => {
                        // A backend failure here may mean the hot store was already
                        // updated; retrying in-band would re-apply the EMA a second
                        // time, so this goes to the dead-letter queue instead of a nak.
                        tracing::warn!(err = %e, feedback_id = %event.feedback_id, "processing failed, dead-lettering");
                        publish_dead_letter(
                            &js,
                            &config,
                            Some(&event),
                            DeadLetterReason::DatabaseError,
                            &e.to_string(),
                            message.payload.clone(),
                        )
                        .await;
                        let _ = message.ack().await;
                    }
                }
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn publish_dead_letter(
    js: &jetstream::Context,
    config: &ConsumerConfig,
    event: Option<&FeedbackEvent>,
    reason: DeadLetterReason,
    detail: &str,
    raw_payload: Bytes,
) {
    let mut headers = HeaderMap::new();
    headers.insert("x-error-type", reason.as_str());
    headers.insert("x-error-message", detail);
    headers.insert("x-failed-at", Utc::now().to_rfc3339().as_str());
    headers.insert("x-original-queue", config.stream_name.as_str());
    if let Some(event) = event {
        headers.insert("x-feedback-id", event.feedback_id.as_str());
    }
    let payload = match event {
        Some(event) => serde_json::to_vec(event).map(Bytes::from).unwrap_or(raw_payload),
        None => raw_payload,
    };

    match js.publish_with_headers(config.dlq_subject.clone(), headers, payload).await {
        Ok(ack) => {
            if let Err(e) = ack.await {
                tracing::error!(err = %e, "dead-letter publish was not acked");
            }
        }
        Err(e) => tracing::error!(err = %e, "failed to publish to dead-letter stream"),
    }
}
