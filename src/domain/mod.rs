// Copyright (c) 2025 - Cowboy AI, Inc.
//! Product Domain Models
//!
//! The three leaf resources and the composite built over them.
//!
//! # Leaf Resources
//!
//! - [`Product`] - identity is `product_id`
//! - [`Recommendation`] - many per product
//! - [`Review`] - many per product
//!
//! Leaf objects are owned and mutated by their own services. The composite
//! only reads them or emits create/delete intents for them.
//!
//! # Composite
//!
//! - [`ProductAggregate`] - product plus summaries of its recommendations and
//!   reviews, and the addresses of the instances that served each part

pub mod composite;
pub mod invariants;
pub mod product;
pub mod recommendation;
pub mod review;

pub use composite::{ProductAggregate, RecommendationSummary, ReviewSummary, ServiceAddresses};
pub use invariants::{ValidationError, ValidationResult};
pub use product::Product;
pub use recommendation::Recommendation;
pub use review::Review;
