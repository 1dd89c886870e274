// Copyright (c) 2025 - Cowboy AI, Inc.

//! Error types for composite operations
//!
//! The composite distinguishes three downstream failure classes plus publish
//! failures on the write path:
//!
//! - [`CompositeError::NotFound`]: the resource is absent (terminal, HTTP 404)
//! - [`CompositeError::InvalidInput`]: bad id, validation failure or duplicate
//!   key (terminal, HTTP 422)
//! - [`CompositeError::Transient`]: timeouts, refused connections, 5xx
//!   (recoverable by a caller retry, never retried here)
//! - [`CompositeError::Publish`]: an event was not accepted by the broker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::TransportFailure;

/// Errors surfaced by the composite read and write paths
#[derive(Debug, Error)]
pub enum CompositeError {
    /// Resource absent
    #[error("{0}")]
    NotFound(String),

    /// Client error: invalid id, failed validation, duplicate key
    #[error("{0}")]
    InvalidInput(String),

    /// Network, timeout or server-side failure of a downstream call
    #[error("Downstream call failed: {0}")]
    Transient(TransportFailure),

    /// Event publishing failed; always terminal for the write path
    #[error("Event publish failed: {0}")]
    Publish(#[from] PublishError),
}

impl CompositeError {
    /// The rejection used for non-positive product ids
    pub fn invalid_product_id(product_id: i32) -> Self {
        CompositeError::InvalidInput(format!("Invalid productId: {}", product_id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CompositeError::NotFound(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CompositeError::InvalidInput(_))
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, CompositeError::Transient(_))
    }
}

/// Result type for composite operations
pub type CompositeResult<T> = Result<T, CompositeError>;

/// Errors that can occur while handing events to the message channel
#[derive(Debug, Error)]
pub enum PublishError {
    /// Envelope could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The broker rejected or never received the message
    #[error("NATS publish error: {0}")]
    Nats(String),

    /// The broker did not acknowledge the message
    #[error("Publish not acknowledged: {0}")]
    Ack(String),

    /// The channel is closed or otherwise unavailable
    #[error("Channel unavailable: {0}")]
    Unavailable(String),
}

/// Result type for publish operations
pub type PublishResult<T> = Result<T, PublishError>;

/// Structured error body returned by the composite and by every leaf service.
///
/// `httpStatus` goes on the wire as the status name (`"NOT_FOUND"`), as the
/// leaf services write it; numeric codes are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpErrorInfo {
    #[serde(with = "status_name")]
    pub http_status: u16,
    pub path: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl HttpErrorInfo {
    pub fn new(http_status: u16, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            http_status,
            path: path.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// `404` <-> `"NOT_FOUND"`
mod status_name {
    use reqwest::StatusCode;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn to_name(status: u16) -> Option<String> {
        let reason = StatusCode::from_u16(status).ok()?.canonical_reason()?;
        Some(reason.to_ascii_uppercase().replace([' ', '-'], "_"))
    }

    pub fn from_name(name: &str) -> Option<u16> {
        (100..600).find(|code| to_name(*code).as_deref() == Some(name))
    }

    pub fn serialize<S: Serializer>(status: &u16, serializer: S) -> Result<S::Ok, S::Error> {
        match to_name(*status) {
            Some(name) => serializer.serialize_str(&name),
            None => serializer.serialize_u16(*status),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Code(u16),
        Name(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => Ok(code),
            Repr::Name(name) => from_name(&name)
                .ok_or_else(|| de::Error::custom(format!("unknown HTTP status: {}", name))),
        }
    }
}
