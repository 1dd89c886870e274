//! NATS client abstraction for the event channels

use async_nats::{jetstream, Client, ConnectOptions, HeaderMap, Subscriber};
use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{PublishError, PublishResult};

/// Configuration for NATS connection
#[derive(Debug, Clone)]
pub struct NatsConfig {
    /// NATS server URLs
    pub servers: Vec<String>,
    /// Client name
    pub name: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            servers: vec!["nats://localhost:4222".to_string()],
            name: "product-composite".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl NatsConfig {
    /// Load from `NATS_URL` (comma separated) and `NATS_CLIENT_NAME`,
    /// falling back to the defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let servers = std::env::var("NATS_URL")
            .map(|urls| {
                urls.split(',')
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .ok()
            .filter(|servers| !servers.is_empty())
            .unwrap_or(defaults.servers);

        let name = std::env::var("NATS_CLIENT_NAME").unwrap_or(defaults.name);

        Self {
            servers,
            name,
            ..defaults
        }
    }
}

/// NATS client wrapper
#[derive(Clone)]
pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Connect with the given configuration
    pub async fn new(config: NatsConfig) -> PublishResult<Self> {
        let connect_options = ConnectOptions::new()
            .name(&config.name)
            .connection_timeout(config.connect_timeout)
            .request_timeout(Some(config.request_timeout));

        let client = async_nats::connect_with_options(config.servers.join(","), connect_options)
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        info!("Connected to NATS at {:?}", config.servers);

        Ok(Self { client })
    }

    /// Fire-and-forget publish with headers (no broker acknowledgement)
    pub async fn publish_with_headers(
        &self,
        subject: &str,
        headers: HeaderMap,
        payload: Bytes,
    ) -> PublishResult<()> {
        self.client
            .publish_with_headers(subject.to_string(), headers, payload)
            .await
            .map_err(|e| PublishError::Nats(e.to_string()))?;

        debug!("Published message to subject: {}", subject);
        Ok(())
    }

    /// Flush buffered publishes to the server
    pub async fn flush(&self) -> PublishResult<()> {
        self.client
            .flush()
            .await
            .map_err(|e| PublishError::Nats(e.to_string()))
    }

    /// Subscribe to a subject
    pub async fn subscribe(&self, subject: &str) -> PublishResult<Subscriber> {
        let subscriber = self
            .client
            .subscribe(subject.to_string())
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

        info!("Subscribed to subject: {}", subject);
        Ok(subscriber)
    }

    /// JetStream context over this connection
    pub fn jetstream(&self) -> jetstream::Context {
        jetstream::new(self.client.clone())
    }

    /// Get the underlying NATS client for advanced operations
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
