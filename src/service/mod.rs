// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composite Orchestration Layer
//!
//! The two halves of the composite service:
//!
//! ```text
//! GET    ──→ ProductAggregator ──→ 3 concurrent reads ──→ ProductAggregate
//!
//! POST   ──→ CompositeCommandCoordinator ──→ N concurrent CREATE events
//! DELETE ──→ CompositeCommandCoordinator ──→ 3 concurrent DELETE events
//! ```
//!
//! # Failure Asymmetry
//!
//! Reads tolerate sub-resource failures: recommendations and reviews degrade
//! to empty sequences. Writes tolerate nothing: a single unacknowledged
//! publish fails the whole operation.
//!
//! Writes never read the leaves; the leaves apply the events on their own
//! schedule, so a read that follows a write may not observe it yet.

pub mod aggregation;
pub mod commands;

pub use aggregation::ProductAggregator;
pub use commands::CompositeCommandCoordinator;
