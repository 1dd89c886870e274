// Copyright (c) 2025 - Cowboy AI, Inc.
//! Product composite service
//!
//! Serves a product together with its recommendations and reviews from three
//! independently owned leaf services, and propagates composite creates and
//! deletes to those services as ordered events.
//!
//! # Architecture
//!
//! ```text
//!              ┌──────────────── read path ────────────────┐
//! HTTP GET ──→ ProductAggregator ──→ ResourceService × 3 (HTTP)
//!
//!              ┌──────────────── write path ───────────────┐
//! HTTP POST ─→ CompositeCommandCoordinator ──→ EventPublisher ──→ JetStream
//! HTTP DELETE                                                      │
//!                                    products / recommendations / reviews
//!                                                                  ↓
//!                                         EventProcessor (leaf side) → store
//! ```
//!
//! Reads are strongly consistent per call; writes are eventually consistent
//! with the leaves.

pub mod api;
pub mod classifier;
pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod jetstream;
pub mod nats;
pub mod processor;
pub mod publisher;
pub mod service;
pub mod subjects;

// Re-export commonly used types
pub use classifier::{classify, TransportFailure};
pub use client::{
    HttpResourceClient, InMemoryResource, ProductResource, RecommendationResource, ResourceService,
    ReviewResource,
};
pub use domain::{Product, ProductAggregate, Recommendation, Review};
pub use errors::{CompositeError, CompositeResult, HttpErrorInfo, PublishError, PublishResult};
pub use events::{EventEnvelope, EventType};
pub use nats::{NatsClient, NatsConfig};
pub use publisher::{EventPublisher, InMemoryEventPublisher, JetStreamEventPublisher};
pub use service::{CompositeCommandCoordinator, ProductAggregator};
pub use subjects::Channel;
