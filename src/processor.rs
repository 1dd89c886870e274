// Copyright (c) 2025 - Cowboy AI, Inc.
//! Leaf-side event processing
//!
//! A leaf resource consumes the envelopes of its channel and applies them to
//! its own store:
//!
//! ```text
//! CREATE {key, data} ──→ ResourceService::create(data)
//! DELETE {key}       ──→ ResourceService::delete(key)
//! ```
//!
//! The channel is read through a durable JetStream consumer, so events
//! published while the leaf is down are applied once it is back. Messages are
//! applied one at a time in stream order and acknowledged only after they
//! were applied or dead-lettered. A message that cannot be decoded or is
//! rejected by the resource is forwarded unchanged to the channel's
//! dead-letter subject with the failure in the `error` header. Transient
//! failures are negatively acknowledged and redelivered.

use async_nats::jetstream::{self, stream::Stream};
use async_nats::HeaderMap;
use bytes::Bytes;
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::client::{Resource, ResourceService};
use crate::errors::{CompositeError, PublishError, PublishResult};
use crate::events::{EnvelopeError, EventEnvelope, EventType};
use crate::jetstream::ensure_channel_consumer;
use crate::nats::NatsClient;
use crate::subjects::ERROR_HEADER;

/// Why a message could not be applied
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Payload is not an envelope of the expected resource
    #[error("Malformed event: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The resource refused the operation (duplicate key, bad id, ...)
    #[error(transparent)]
    Rejected(#[from] CompositeError),
}

impl ProcessError {
    /// Whether applying the same message again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProcessError::Rejected(e) if e.is_transient())
    }
}

/// A rejected message on its way to the dead-letter subject
#[derive(Debug, Clone, PartialEq)]
pub struct DeadLetter {
    pub subject: String,
    pub error: String,
    pub payload: Bytes,
}

/// What happened to one message
#[derive(Debug)]
pub enum Disposition {
    Applied,
    /// Leave the message on the channel for redelivery
    Retry(ProcessError),
    DeadLetter(DeadLetter),
}

impl Disposition {
    pub fn dead_letter(self) -> Option<DeadLetter> {
        match self {
            Disposition::DeadLetter(dead_letter) => Some(dead_letter),
            _ => None,
        }
    }
}

/// Applies envelopes of one channel to a resource
pub struct EventProcessor<R: Resource> {
    service: Arc<dyn ResourceService<R>>,
}

impl<R: Resource> EventProcessor<R> {
    pub fn new(service: Arc<dyn ResourceService<R>>) -> Self {
        Self { service }
    }

    /// Decode and apply one encoded envelope
    pub async fn process(&self, payload: &[u8]) -> Result<(), ProcessError> {
        let event: EventEnvelope<i32, R::Item> = serde_json::from_slice(payload)?;
        let (event_type, key, data) = event.into_parts();

        debug!(
            channel = %R::CHANNEL,
            event_type = %event_type,
            key,
            "Process message"
        );

        match event_type {
            EventType::Create => {
                let item = data.ok_or(EnvelopeError::MissingData)?;
                info!(resource = R::NAME, product_id = key, "Create entity");
                self.service.create(item).await?;
            }
            EventType::Delete => {
                info!(resource = R::NAME, product_id = key, "Delete entities");
                self.service.delete(key).await?;
            }
        }

        Ok(())
    }

    /// Process one message and decide its fate
    pub async fn handle(&self, payload: Bytes) -> Disposition {
        match self.process(&payload).await {
            Ok(()) => Disposition::Applied,
            Err(error) if error.is_retryable() => {
                warn!(
                    channel = %R::CHANNEL,
                    error = %error,
                    "Message not applied, leaving it for redelivery"
                );
                Disposition::Retry(error)
            }
            Err(error) => {
                warn!(
                    channel = %R::CHANNEL,
                    error = %error,
                    "Message rejected, forwarding to dead-letter subject"
                );
                Disposition::DeadLetter(DeadLetter {
                    subject: R::CHANNEL.dead_letter_subject(),
                    error: error.to_string(),
                    payload,
                })
            }
        }
    }
}

/// Durable consumer name of a resource's leaf service
pub fn consumer_name<R: Resource>() -> String {
    format!("{}-leaf", R::NAME)
}

/// Consume the resource's channel from the event stream until the consumer
/// ends. Instances sharing `durable_name` share one position in the channel.
pub async fn spawn_consumer<R: Resource>(
    client: NatsClient,
    stream: &Stream,
    processor: Arc<EventProcessor<R>>,
    durable_name: &str,
) -> PublishResult<JoinHandle<()>> {
    let consumer = ensure_channel_consumer(stream, R::CHANNEL, durable_name).await?;
    let messages = consumer
        .messages()
        .await
        .map_err(|e| PublishError::Unavailable(e.to_string()))?;

    let durable_name = durable_name.to_string();
    info!(consumer = %durable_name, channel = %R::CHANNEL, "Consuming events");

    let handle = tokio::spawn(async move {
        tokio::pin!(messages);

        while let Some(message) = messages.next().await {
            let message = match message {
                Ok(message) => message,
                Err(e) => {
                    warn!(consumer = %durable_name, error = %e, "Failed to receive message");
                    continue;
                }
            };

            debug!(
                subject = %message.subject,
                payload_size = message.payload.len(),
                "Received event"
            );

            match processor.handle(message.payload.clone()).await {
                Disposition::Applied => acknowledge(&message).await,
                Disposition::Retry(_) => reject(&message).await,
                Disposition::DeadLetter(dead_letter) => match forward(&client, dead_letter).await {
                    Ok(()) => acknowledge(&message).await,
                    Err(e) => {
                        error!(consumer = %durable_name, error = %e, "Failed to dead-letter message");
                        reject(&message).await;
                    }
                },
            }
        }

        warn!(consumer = %durable_name, "Consumer ended");
    });

    Ok(handle)
}

async fn acknowledge(message: &jetstream::Message) {
    if let Err(e) = message.ack().await {
        error!(subject = %message.subject, error = %e, "Failed to acknowledge message");
    }
}

async fn reject(message: &jetstream::Message) {
    if let Err(e) = message.ack_with(jetstream::AckKind::Nak(None)).await {
        error!(subject = %message.subject, error = %e, "Failed to NAK message");
    }
}

async fn forward(client: &NatsClient, dead_letter: DeadLetter) -> PublishResult<()> {
    let mut headers = HeaderMap::new();
    // Header values cannot span lines
    let reason = dead_letter.error.replace(['\r', '\n'], " ");
    headers.insert(ERROR_HEADER, reason.as_str());

    client
        .publish_with_headers(&dead_letter.subject, headers, dead_letter.payload)
        .await?;
    client.flush().await
}
