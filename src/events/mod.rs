// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composite Events
//!
//! Create and delete intents the composite emits towards the leaf resources.
//! Events are the only way the composite changes leaf state.
//!
//! # Event Flow
//!
//! ```text
//! POST/DELETE /product-composite
//!        ↓
//! CompositeCommandCoordinator ── EventEnvelope ──> channel (products | recommendations | reviews)
//!                                                        ↓
//!                                              leaf EventProcessor (upsert / delete)
//! ```
//!
//! All envelopes concerning a product are keyed and partitioned by its
//! `productId`, so a single consumer sees them in emission order.

pub mod envelope;

pub use envelope::{is_same_event_json, EnvelopeError, EventEnvelope, EventType};

use crate::domain::{Product, Recommendation, Review};

/// Envelope carried on the `products` channel
pub type ProductEvent = EventEnvelope<i32, Product>;

/// Envelope carried on the `recommendations` channel
pub type RecommendationEvent = EventEnvelope<i32, Recommendation>;

/// Envelope carried on the `reviews` channel
pub type ReviewEvent = EventEnvelope<i32, Review>;
