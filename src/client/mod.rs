// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource clients for the three leaf services
//!
//! Every leaf offers the same capability: get, create and delete by product
//! id. [`ResourceService`] expresses that once, parameterized by a
//! [`Resource`] descriptor that supplies the payload type, the REST paths and
//! the leaf's validation rules.
//!
//! # Implementations
//!
//! - [`HttpResourceClient`] - one outbound HTTP call per invocation, failures
//!   routed through [`crate::classifier::classify`]
//! - [`InMemoryResource`] - a leaf held in process memory
//!
//! # Resources
//!
//! | Descriptor               | Item             | `fetch` yields        |
//! |--------------------------|------------------|-----------------------|
//! | [`ProductResource`]      | `Product`        | `Product`             |
//! | [`RecommendationResource`] | `Recommendation` | `Vec<Recommendation>` |
//! | [`ReviewResource`]       | `Review`         | `Vec<Review>`         |
//!
//! Ids are not validated here; the aggregator and the coordinator check
//! them before dispatch.

pub mod health;
pub mod http;
pub mod memory;

pub use health::{CompositeHealth, Health, HealthIndicator, HealthStatus};
pub use http::HttpResourceClient;
pub use memory::InMemoryResource;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::domain::invariants::{self, ValidationResult};
use crate::domain::{Product, Recommendation, Review};
use crate::errors::{CompositeError, CompositeResult};
use crate::subjects::Channel;

/// Static description of one leaf resource
pub trait Resource: Send + Sync + 'static {
    /// Payload of a single row
    type Item: Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static;

    /// What a read by product id yields
    type Fetched: DeserializeOwned + Send + 'static;

    /// Service name, used for health reporting and logs
    const NAME: &'static str;

    /// Event channel carrying this resource's envelopes
    const CHANNEL: Channel;

    /// Collection path used for create
    const COLLECTION_PATH: &'static str;

    /// Path (with query) of a read by product id
    fn fetch_path(product_id: i32) -> String;

    /// Path (with query) of a delete by product id
    fn delete_path(product_id: i32) -> String;

    fn product_id(item: &Self::Item) -> i32;

    /// Whether two rows collide on the resource's unique key
    fn same_key(a: &Self::Item, b: &Self::Item) -> bool;

    /// Rejection message for a duplicate key
    fn duplicate_message(item: &Self::Item) -> String;

    fn validate(item: &Self::Item) -> ValidationResult;

    /// Record the serving instance on a row being returned
    fn stamp(item: Self::Item, service_address: &str) -> Self::Item;

    /// Shape the rows found for a product id into the read result
    fn collect(product_id: i32, rows: Vec<Self::Item>) -> CompositeResult<Self::Fetched>;
}

/// Products; a read yields exactly one product or fails with NotFound
pub struct ProductResource;

impl Resource for ProductResource {
    type Item = Product;
    type Fetched = Product;

    const NAME: &'static str = "product";
    const CHANNEL: Channel = Channel::Products;
    const COLLECTION_PATH: &'static str = "/product";

    fn fetch_path(product_id: i32) -> String {
        format!("/product/{}", product_id)
    }

    fn delete_path(product_id: i32) -> String {
        format!("/product/{}", product_id)
    }

    fn product_id(item: &Product) -> i32 {
        item.product_id
    }

    fn same_key(a: &Product, b: &Product) -> bool {
        a.product_id == b.product_id
    }

    fn duplicate_message(item: &Product) -> String {
        format!("Duplicate key, Product Id: {}", item.product_id)
    }

    fn validate(item: &Product) -> ValidationResult {
        invariants::validate_product(item)
    }

    fn stamp(item: Product, service_address: &str) -> Product {
        item.with_service_address(service_address)
    }

    fn collect(product_id: i32, rows: Vec<Product>) -> CompositeResult<Product> {
        rows.into_iter().next().ok_or_else(|| {
            CompositeError::NotFound(format!("No product found for productId: {}", product_id))
        })
    }
}

/// Recommendations; a read yields every recommendation of the product
pub struct RecommendationResource;

impl Resource for RecommendationResource {
    type Item = Recommendation;
    type Fetched = Vec<Recommendation>;

    const NAME: &'static str = "recommendation";
    const CHANNEL: Channel = Channel::Recommendations;
    const COLLECTION_PATH: &'static str = "/recommendation";

    fn fetch_path(product_id: i32) -> String {
        format!("/recommendation?productId={}", product_id)
    }

    fn delete_path(product_id: i32) -> String {
        format!("/recommendation?productId={}", product_id)
    }

    fn product_id(item: &Recommendation) -> i32 {
        item.product_id
    }

    fn same_key(a: &Recommendation, b: &Recommendation) -> bool {
        a.product_id == b.product_id && a.recommendation_id == b.recommendation_id
    }

    fn duplicate_message(item: &Recommendation) -> String {
        format!(
            "Duplicate key, Product Id: {}, Recommendation Id:{}",
            item.product_id, item.recommendation_id
        )
    }

    fn validate(item: &Recommendation) -> ValidationResult {
        invariants::validate_recommendation(item)
    }

    fn stamp(item: Recommendation, service_address: &str) -> Recommendation {
        item.with_service_address(service_address)
    }

    fn collect(_product_id: i32, rows: Vec<Recommendation>) -> CompositeResult<Vec<Recommendation>> {
        Ok(rows)
    }
}

/// Reviews; a read yields every review of the product
pub struct ReviewResource;

impl Resource for ReviewResource {
    type Item = Review;
    type Fetched = Vec<Review>;

    const NAME: &'static str = "review";
    const CHANNEL: Channel = Channel::Reviews;
    const COLLECTION_PATH: &'static str = "/review";

    fn fetch_path(product_id: i32) -> String {
        format!("/review?productId={}", product_id)
    }

    fn delete_path(product_id: i32) -> String {
        format!("/review?productId={}", product_id)
    }

    fn product_id(item: &Review) -> i32 {
        item.product_id
    }

    fn same_key(a: &Review, b: &Review) -> bool {
        a.product_id == b.product_id && a.review_id == b.review_id
    }

    fn duplicate_message(item: &Review) -> String {
        format!(
            "Duplicate key, Product Id: {}, Review Id:{}",
            item.product_id, item.review_id
        )
    }

    fn validate(item: &Review) -> ValidationResult {
        invariants::validate_review(item)
    }

    fn stamp(item: Review, service_address: &str) -> Review {
        item.with_service_address(service_address)
    }

    fn collect(_product_id: i32, rows: Vec<Review>) -> CompositeResult<Vec<Review>> {
        Ok(rows)
    }
}

/// Get, create and delete by product id against one leaf resource
#[async_trait]
pub trait ResourceService<R: Resource>: Send + Sync {
    /// Read by product id
    async fn fetch(&self, product_id: i32) -> CompositeResult<R::Fetched>;

    /// Create one row
    async fn create(&self, item: R::Item) -> CompositeResult<R::Item>;

    /// Remove every row of the product; deleting nothing succeeds
    async fn delete(&self, product_id: i32) -> CompositeResult<()>;
}

/// Listing of every product
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn fetch_all(&self) -> CompositeResult<Vec<Product>>;
}

/// Everything the composite needs from the product service
pub trait ProductService: ResourceService<ProductResource> + ProductCatalog {}

impl<T> ProductService for T where T: ResourceService<ProductResource> + ProductCatalog + ?Sized {}
