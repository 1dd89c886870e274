// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event publishing
//!
//! Serializes typed envelopes and hands them to a message channel, tagged
//! with the product id as the partition (ordering) key.
//!
//! - [`EventPublisher`] - the channel seam the write path depends on
//! - [`JetStreamEventPublisher`] - NATS JetStream, resolves once the broker
//!   acknowledged the message
//! - [`InMemoryEventPublisher`] - per-channel in-process queues for local
//!   runs and tests

pub mod jetstream;
pub mod memory;

pub use jetstream::JetStreamEventPublisher;
pub use memory::InMemoryEventPublisher;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::fmt::Display;
use uuid::Uuid;

use crate::errors::PublishResult;
use crate::events::{EventEnvelope, EventType};
use crate::subjects::Channel;

/// An encoded envelope ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub channel: Channel,
    /// Ordering key; equal to the envelope key
    pub partition_key: String,
    /// Unique per message, lets the broker drop duplicate sends
    pub message_id: String,
    pub event_type: EventType,
    pub payload: Bytes,
}

impl OutboundMessage {
    /// Encode an envelope for a channel
    pub fn from_event<K, T>(channel: Channel, event: &EventEnvelope<K, T>) -> PublishResult<Self>
    where
        K: Serialize + Display,
        T: Serialize,
    {
        let payload = serde_json::to_vec(event)?;

        Ok(Self {
            channel,
            partition_key: event.key().to_string(),
            message_id: Uuid::now_v7().to_string(),
            event_type: event.event_type(),
            payload: Bytes::from(payload),
        })
    }
}

/// Hands encoded envelopes to a message channel
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Resolves once the channel has accepted the message
    async fn publish(&self, message: OutboundMessage) -> PublishResult<()>;
}
