// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event envelope propagated to the leaf resources
//!
//! An envelope is immutable once constructed. DELETE envelopes carry no
//! data, CREATE envelopes always carry a payload; both constructors and the
//! deserializer enforce this, so an envelope that violates it cannot exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What the receiving resource should do with the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Create,
    Delete,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Create => write!(f, "CREATE"),
            EventType::Delete => write!(f, "DELETE"),
        }
    }
}

/// Envelope invariant violations found while decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("CREATE event carries no data")]
    MissingData,

    #[error("DELETE event must not carry data")]
    UnexpectedData,
}

/// Typed event envelope: `{eventType, key, data, eventCreatedAt}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(
    try_from = "RawEnvelope<K, T>",
    bound(deserialize = "K: Deserialize<'de>, T: Deserialize<'de>")
)]
pub struct EventEnvelope<K, T> {
    event_type: EventType,
    key: K,
    data: Option<T>,
    event_created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "K: Deserialize<'de>, T: Deserialize<'de>"))]
struct RawEnvelope<K, T> {
    event_type: EventType,
    key: K,
    #[serde(default)]
    data: Option<T>,
    event_created_at: DateTime<Utc>,
}

impl<K, T> TryFrom<RawEnvelope<K, T>> for EventEnvelope<K, T> {
    type Error = EnvelopeError;

    fn try_from(raw: RawEnvelope<K, T>) -> Result<Self, Self::Error> {
        match (raw.event_type, raw.data.is_some()) {
            (EventType::Create, false) => Err(EnvelopeError::MissingData),
            (EventType::Delete, true) => Err(EnvelopeError::UnexpectedData),
            _ => Ok(Self {
                event_type: raw.event_type,
                key: raw.key,
                data: raw.data,
                event_created_at: raw.event_created_at,
            }),
        }
    }
}

impl<K, T> EventEnvelope<K, T> {
    pub fn create(key: K, data: T) -> Self {
        Self {
            event_type: EventType::Create,
            key,
            data: Some(data),
            event_created_at: Utc::now(),
        }
    }

    pub fn delete(key: K) -> Self {
        Self {
            event_type: EventType::Delete,
            key,
            data: None,
            event_created_at: Utc::now(),
        }
    }

    /// Pin the creation timestamp (fixtures and replays)
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.event_created_at = created_at;
        self
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn event_created_at(&self) -> DateTime<Utc> {
        self.event_created_at
    }

    pub fn into_parts(self) -> (EventType, K, Option<T>) {
        (self.event_type, self.key, self.data)
    }
}

impl<K: PartialEq, T: PartialEq> EventEnvelope<K, T> {
    /// Equality on type, key and data; the creation time is regenerated per
    /// envelope and never compared.
    pub fn same_event_except_created_at(&self, other: &Self) -> bool {
        self.event_type == other.event_type && self.key == other.key && self.data == other.data
    }
}

/// Compare an encoded envelope with an expected one, ignoring `eventCreatedAt`.
///
/// Works on the JSON representation so it can be applied directly to message
/// payloads taken off a channel.
pub fn is_same_event_json<K, T>(payload: &[u8], expected: &EventEnvelope<K, T>) -> bool
where
    K: Serialize,
    T: Serialize,
{
    let actual = match serde_json::from_slice::<serde_json::Value>(payload) {
        Ok(value) => value,
        Err(_) => return false,
    };
    let expected = match serde_json::to_value(expected) {
        Ok(value) => value,
        Err(_) => return false,
    };

    strip_created_at(actual) == strip_created_at(expected)
}

fn strip_created_at(mut value: serde_json::Value) -> serde_json::Value {
    if let Some(object) = value.as_object_mut() {
        object.remove("eventCreatedAt");
    }
    value
}
