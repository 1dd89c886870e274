// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service configuration
//!
//! Read from the environment, every variable optional:
//!
//! | Variable                     | Default                      |
//! |------------------------------|------------------------------|
//! | `COMPOSITE_BIND_ADDR`        | `0.0.0.0:7000`               |
//! | `COMPOSITE_SERVICE_ADDRESS`  | `<HOSTNAME>/<bind addr>`     |
//! | `PRODUCT_SERVICE_URL`        | `http://product`             |
//! | `RECOMMENDATION_SERVICE_URL` | `http://recommendation`      |
//! | `REVIEW_SERVICE_URL`         | `http://review`              |
//! | `HTTP_TIMEOUT_SECS`          | `10`                         |
//! | `NATS_URL`                   | `nats://localhost:4222`      |
//! | `NATS_CLIENT_NAME`           | `product-composite`          |
//! | `NATS_STREAM`                | `PRODUCT_COMPOSITE_EVENTS`   |

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::jetstream::JetStreamConfig;
use crate::nats::NatsConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {variable}: {value}")]
    Invalid { variable: &'static str, value: String },
}

/// Base URLs of the leaf services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafUrls {
    pub product: String,
    pub recommendation: String,
    pub review: String,
}

impl Default for LeafUrls {
    fn default() -> Self {
        Self {
            product: "http://product".to_string(),
            recommendation: "http://recommendation".to_string(),
            review: "http://review".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompositeConfig {
    pub bind_addr: SocketAddr,
    /// Identity reported as `serviceAddresses.composite`
    pub service_address: String,
    pub leaves: LeafUrls,
    pub http_timeout: Duration,
    pub nats: NatsConfig,
    pub stream: JetStreamConfig,
}

impl CompositeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; NATS and stream settings are
    /// always read from the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("COMPOSITE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            variable: "COMPOSITE_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let service_address = lookup("COMPOSITE_SERVICE_ADDRESS").unwrap_or_else(|| {
            let host = lookup("HOSTNAME").unwrap_or_else(|| "localhost".to_string());
            format!("{}/{}", host, bind_addr)
        });

        let defaults = LeafUrls::default();
        let leaves = LeafUrls {
            product: lookup("PRODUCT_SERVICE_URL").unwrap_or(defaults.product),
            recommendation: lookup("RECOMMENDATION_SERVICE_URL").unwrap_or(defaults.recommendation),
            review: lookup("REVIEW_SERVICE_URL").unwrap_or(defaults.review),
        };

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    variable: "HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            service_address,
            leaves,
            http_timeout,
            nats: NatsConfig::from_env(),
            stream: JetStreamConfig::from_env(),
        })
    }
}
