// Copyright (c) 2025 - Cowboy AI, Inc.

//! Classification of transport failures into the composite error taxonomy
//!
//! Both the read path and the write path route every downstream failure
//! through [`classify`], so a given failure always yields the same domain
//! error regardless of call site.
//!
//! | Failure                         | Domain error     |
//! |---------------------------------|------------------|
//! | HTTP 404                        | `NotFound`       |
//! | HTTP 422                        | `InvalidInput`   |
//! | any other status, timeout, I/O  | `Transient`      |
//!
//! For 404 and 422 the message is taken from the structured error body
//! (`{httpStatus, path, message, timestamp}`) when one is present.

use thiserror::Error;

use crate::errors::CompositeError;

const NOT_FOUND: u16 = 404;
const UNPROCESSABLE_ENTITY: u16 = 422;

/// A failed outbound call, as observed at the transport level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// The peer answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The call did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// No connection could be established
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The peer answered but the body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Anything else the transport reports
    #[error("Transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportFailure::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportFailure::Connect(err.to_string())
        } else if err.is_decode() {
            TransportFailure::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportFailure::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            TransportFailure::Other(err.to_string())
        }
    }
}

/// Map a transport failure to its domain error. Pure and deterministic.
pub fn classify(failure: TransportFailure) -> CompositeError {
    match failure {
        TransportFailure::Status {
            status: NOT_FOUND,
            body,
        } => CompositeError::NotFound(error_message(NOT_FOUND, &body)),
        TransportFailure::Status {
            status: UNPROCESSABLE_ENTITY,
            body,
        } => CompositeError::InvalidInput(error_message(UNPROCESSABLE_ENTITY, &body)),
        other => CompositeError::Transient(other),
    }
}

/// Extract the human-readable message from an error body.
///
/// Only the `message` field is read, so bodies whose `httpStatus` is a name
/// ("NOT_FOUND") rather than a code are understood as well.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.to_string()
            }
        })
}
