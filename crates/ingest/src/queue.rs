// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publishes accepted feedback onto the durable JetStream queue.

use async_nats::jetstream::{self, stream::Config as StreamConfig};
use feedback_core::FeedbackEvent;

pub struct QueuePublisher {
    jetstream: jetstream::Context,
    subject: String,
}

impl QueuePublisher {
    /// Connect to NATS and make sure the feedback stream exists.
    pub async fn connect(nats_url: &str, stream_name: &str, subject: &str) -> anyhow::Result<Self> {
        let client = async_nats::connect(nats_url).await?;
        let jetstream = jetstream::new(client);
        jetstream
            .get_or_create_stream(StreamConfig {
                name: stream_name.to_owned(),
                subjects: vec![subject.to_owned()],
                ..Default::default()
            })
            .await?;
        Ok(Self { jetstream, subject: subject.to_owned() })
    }

    /// Publish an event and wait for the broker's durability ack.
    pub async fn publish(&self, event: &FeedbackEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_vec(event)?;
        self.jetstream.publish(self.subject.clone(), payload.into()).await?.await?;
        Ok(())
    }
}
