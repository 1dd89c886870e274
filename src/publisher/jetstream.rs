// Copyright (c) 2025 - Cowboy AI, Inc.
//! JetStream-backed event publisher

use async_nats::{jetstream, HeaderMap};
use async_trait::async_trait;
use tracing::debug;

use super::{EventPublisher, OutboundMessage};
use crate::errors::{PublishError, PublishResult};
use crate::nats::NatsClient;
use crate::subjects::PARTITION_KEY_HEADER;

/// JetStream de-duplication header
const MESSAGE_ID_HEADER: &str = "Nats-Msg-Id";

/// Publishes to the channel subject and waits for the stream acknowledgement
#[derive(Clone)]
pub struct JetStreamEventPublisher {
    context: jetstream::Context,
}

impl JetStreamEventPublisher {
    pub fn new(client: &NatsClient) -> Self {
        Self {
            context: client.jetstream(),
        }
    }

    pub fn from_context(context: jetstream::Context) -> Self {
        Self { context }
    }
}

#[async_trait]
impl EventPublisher for JetStreamEventPublisher {
    async fn publish(&self, message: OutboundMessage) -> PublishResult<()> {
        let subject = message.channel.subject();

        let mut headers = HeaderMap::new();
        headers.insert(PARTITION_KEY_HEADER, message.partition_key.as_str());
        headers.insert(MESSAGE_ID_HEADER, message.message_id.as_str());

        let ack = self
            .context
            .publish_with_headers(subject.clone(), headers, message.payload)
            .await
            .map_err(|e| PublishError::Nats(e.to_string()))?
            .await
            .map_err(|e| PublishError::Ack(e.to_string()))?;

        debug!(
            subject = %subject,
            partition_key = %message.partition_key,
            event_type = %message.event_type,
            stream_sequence = ack.sequence,
            "Event published"
        );

        Ok(())
    }
}
