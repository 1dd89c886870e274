// Copyright (c) 2025 - Cowboy AI, Inc.

//! JetStream configuration for the composite event channels
//!
//! The composite publishes through JetStream so that a publish only counts as
//! done once the broker has stored the message. The stream captures the three
//! channel subjects; leaf consumers read them in stream order.
//!
//! # Example
//!
//! ```rust,no_run
//! use product_composite::jetstream::{JetStreamConfig, ensure_event_stream};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = async_nats::connect("nats://localhost:4222").await?;
//!     let jetstream = async_nats::jetstream::new(client);
//!
//!     ensure_event_stream(&jetstream, JetStreamConfig::default()).await?;
//!
//!     Ok(())
//! }
//! ```

use async_nats::jetstream::{
    self,
    consumer::{pull, AckPolicy, DeliverPolicy, PullConsumer},
    stream::Stream,
};
use std::time::Duration;
use tracing::info;

use crate::errors::{PublishError, PublishResult};
use crate::subjects::Channel;

/// Configuration for the composite event stream
#[derive(Debug, Clone)]
pub struct JetStreamConfig {
    /// Stream name
    pub stream_name: String,

    /// Subjects this stream captures (defaults to the three channels)
    pub subjects: Vec<String>,

    /// Maximum age of messages (default: 7 days)
    pub max_age: Duration,

    /// Storage type (File or Memory)
    pub storage: StorageType,

    /// Number of replicas (for clustered NATS)
    pub replicas: usize,
}

impl Default for JetStreamConfig {
    fn default() -> Self {
        Self {
            stream_name: "PRODUCT_COMPOSITE_EVENTS".to_string(),
            subjects: Channel::ALL.iter().map(Channel::subject).collect(),
            max_age: Duration::from_secs(7 * 24 * 60 * 60), // 7 days
            storage: StorageType::File,
            replicas: 1,
        }
    }
}

impl JetStreamConfig {
    /// Default configuration with the stream name taken from `NATS_STREAM`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            stream_name: std::env::var("NATS_STREAM").unwrap_or(defaults.stream_name.clone()),
            ..defaults
        }
    }
}

/// Storage type for JetStream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// File-based storage (persistent across restarts)
    File,
    /// Memory-based storage (faster, but lost on restart)
    Memory,
}

/// Get the event stream, creating it when absent. Idempotent.
pub async fn ensure_event_stream(
    jetstream: &jetstream::Context,
    config: JetStreamConfig,
) -> PublishResult<Stream> {
    let storage = match config.storage {
        StorageType::File => jetstream::stream::StorageType::File,
        StorageType::Memory => jetstream::stream::StorageType::Memory,
    };

    let stream_config = jetstream::stream::Config {
        name: config.stream_name.clone(),
        subjects: config.subjects,
        max_age: config.max_age,
        storage,
        num_replicas: config.replicas,
        ..Default::default()
    };

    jetstream
        .get_or_create_stream(stream_config)
        .await
        .map_err(|e| PublishError::Unavailable(e.to_string()))
}

/// Durable pull consumer of one channel, created when absent.
///
/// Acknowledgement is explicit and at most one message is in flight, so every
/// instance bound to the same durable name applies the channel in stream
/// order and each message is applied by exactly one of them.
pub async fn ensure_channel_consumer(
    stream: &Stream,
    channel: Channel,
    durable_name: &str,
) -> PublishResult<PullConsumer> {
    if let Ok(consumer) = stream.get_consumer::<pull::Config>(durable_name).await {
        info!(consumer = durable_name, channel = %channel, "Found existing consumer");
        return Ok(consumer);
    }

    let consumer = stream
        .create_consumer(channel_consumer_config(channel, durable_name))
        .await
        .map_err(|e| PublishError::Unavailable(e.to_string()))?;

    info!(consumer = durable_name, channel = %channel, "Created consumer");
    Ok(consumer)
}

fn channel_consumer_config(channel: Channel, durable_name: &str) -> pull::Config {
    pull::Config {
        durable_name: Some(durable_name.to_string()),
        filter_subject: channel.subject(),
        ack_policy: AckPolicy::Explicit,
        deliver_policy: DeliverPolicy::All,
        max_ack_pending: 1,
        ..Default::default()
    }
}
