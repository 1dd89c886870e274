// Copyright (c) 2025 - Cowboy AI, Inc.

//! NATS subjects for composite events
//!
//! One channel per leaf resource. The channel name is also the NATS subject
//! the envelopes are published on:
//!
//! ```text
//! products         CREATE/DELETE product
//! recommendations  CREATE/DELETE recommendation
//! reviews          CREATE/DELETE review
//! ```
//!
//! Messages a leaf consumer could not apply are forwarded to the channel's
//! dead-letter subject, `{channel}.dlq`.
//!
//! # Examples
//!
//! ```rust
//! use product_composite::subjects::Channel;
//!
//! assert_eq!(Channel::Products.subject(), "products");
//! assert_eq!(Channel::Reviews.dead_letter_subject(), "reviews.dlq");
//! ```

use std::fmt;

/// Suffix of dead-letter subjects
pub const DEAD_LETTER_SUFFIX: &str = "dlq";

/// Header carrying the ordering key of a message
pub const PARTITION_KEY_HEADER: &str = "partitionKey";

/// Header carrying the failure reason on dead-lettered messages
pub const ERROR_HEADER: &str = "error";

/// Event channels, one per leaf resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Products,
    Recommendations,
    Reviews,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Products, Channel::Recommendations, Channel::Reviews];

    /// Subject envelopes are published on
    pub fn subject(&self) -> String {
        self.to_string()
    }

    /// Subject for messages the consumer rejected
    pub fn dead_letter_subject(&self) -> String {
        format!("{}.{}", self, DEAD_LETTER_SUFFIX)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Products => write!(f, "products"),
            Channel::Recommendations => write!(f, "recommendations"),
            Channel::Reviews => write!(f, "reviews"),
        }
    }
}
