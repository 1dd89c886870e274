// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for product-composite
//!
//! Deterministic test data plus test doubles for the leaf resources and the
//! event channel.
//!
//! # Doubles
//! - [`StubResource`] - scripted reads, counts calls, can hold every read at
//!   a shared barrier
//! - [`InFlightResource`] - slow empty reads, records peak concurrency
//! - [`FailingPublisher`] - records messages and refuses one channel
//! - [`DownIndicator`] - health probe that always reports DOWN

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Barrier, Mutex};

use product_composite::client::{
    Health, HealthIndicator, ProductCatalog, ProductResource, RecommendationResource, Resource,
    ResourceService, ReviewResource,
};
use product_composite::domain::{
    Product, ProductAggregate, Recommendation, RecommendationSummary, Review, ReviewSummary,
};
use product_composite::errors::{CompositeError, CompositeResult, PublishError, PublishResult};
use product_composite::publisher::{EventPublisher, OutboundMessage};
use product_composite::subjects::Channel;
use product_composite::{classify, InMemoryResource, TransportFailure};

pub const PRODUCT_ID_OK: i32 = 1;
pub const PRODUCT_ID_NOT_FOUND: i32 = 13;
pub const PRODUCT_ID_INVALID: i32 = 113;

pub const COMPOSITE_ADDRESS: &str = "composite-1/0.0.0.0:7000";
pub const PRODUCT_ADDRESS: &str = "product-1/0.0.0.0:7001";
pub const RECOMMENDATION_ADDRESS: &str = "recommendation-1/0.0.0.0:7002";
pub const REVIEW_ADDRESS: &str = "review-1/0.0.0.0:7003";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn fixed_date() -> NaiveDate {
    fixed_timestamp().date_naive()
}

pub fn product(product_id: i32) -> Product {
    Product::new(product_id, "name", 1).with_service_address(PRODUCT_ADDRESS)
}

pub fn recommendation(product_id: i32, recommendation_id: i32) -> Recommendation {
    Recommendation::new(product_id, recommendation_id, "author", 1, "content")
        .with_service_address(RECOMMENDATION_ADDRESS)
}

pub fn review(product_id: i32, review_id: i32) -> Review {
    Review::new(product_id, review_id, "author", "subject", "content", 3)
        .with_date(fixed_date())
        .with_service_address(REVIEW_ADDRESS)
}

/// Composite with one recommendation and one review
pub fn composite(product_id: i32) -> ProductAggregate {
    ProductAggregate::new(product_id, "name", 1)
        .with_recommendations(vec![RecommendationSummary::new(1, "a", 1, "c")])
        .with_reviews(vec![ReviewSummary::new(1, "a", "s", "c", 3)])
}

/// Transient failure as produced by a 500 response
pub fn server_error() -> CompositeError {
    classify(TransportFailure::Status {
        status: 500,
        body: "boom".to_string(),
    })
}

type FetchFn<R> = Box<dyn Fn(i32) -> CompositeResult<<R as Resource>::Fetched> + Send + Sync>;

/// Leaf double with scripted reads
pub struct StubResource<R: Resource> {
    fetch: FetchFn<R>,
    catalog: Vec<R::Item>,
    barrier: Option<Arc<Barrier>>,
    calls: AtomicUsize,
}

impl<R: Resource> StubResource<R> {
    pub fn new<F>(fetch: F) -> Self
    where
        F: Fn(i32) -> CompositeResult<R::Fetched> + Send + Sync + 'static,
    {
        Self {
            fetch: Box::new(fetch),
            catalog: Vec::new(),
            barrier: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every read waits at the barrier before answering
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn with_catalog(mut self, catalog: Vec<R::Item>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: Resource> ResourceService<R> for StubResource<R> {
    async fn fetch(&self, product_id: i32) -> CompositeResult<R::Fetched> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        (self.fetch)(product_id)
    }

    async fn create(&self, _item: R::Item) -> CompositeResult<R::Item> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CompositeError::InvalidInput("create not scripted".to_string()))
    }

    async fn delete(&self, _product_id: i32) -> CompositeResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for StubResource<ProductResource> {
    async fn fetch_all(&self) -> CompositeResult<Vec<Product>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.catalog.clone())
    }
}

/// Leaf double whose reads take a while and answer empty; tracks how many
/// reads were in flight at once
pub struct InFlightResource<R> {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
    _resource: PhantomData<fn() -> R>,
}

impl<R> InFlightResource<R> {
    pub fn new() -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            _resource: PhantomData,
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R> ResourceService<R> for InFlightResource<R>
where
    R: Resource,
    R::Fetched: Default,
{
    async fn fetch(&self, _product_id: i32) -> CompositeResult<R::Fetched> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(R::Fetched::default())
    }

    async fn create(&self, item: R::Item) -> CompositeResult<R::Item> {
        Ok(item)
    }

    async fn delete(&self, _product_id: i32) -> CompositeResult<()> {
        Ok(())
    }
}

/// Leaf doubles answering with the standard fixtures
pub struct Stubs {
    pub products: Arc<StubResource<ProductResource>>,
    pub recommendations: Arc<StubResource<RecommendationResource>>,
    pub reviews: Arc<StubResource<ReviewResource>>,
}

impl Stubs {
    pub fn total_calls(&self) -> usize {
        self.products.calls() + self.recommendations.calls() + self.reviews.calls()
    }
}

pub fn products_stub() -> StubResource<ProductResource> {
    StubResource::new(|id| match id {
        PRODUCT_ID_NOT_FOUND => Err(CompositeError::NotFound(format!(
            "No product found for productId: {}",
            id
        ))),
        PRODUCT_ID_INVALID => Err(CompositeError::invalid_product_id(id)),
        _ => Ok(product(id)),
    })
}

pub fn recommendations_stub() -> StubResource<RecommendationResource> {
    StubResource::new(|id| Ok(vec![recommendation(id, 1), recommendation(id, 2)]))
}

pub fn reviews_stub() -> StubResource<ReviewResource> {
    StubResource::new(|id| Ok(vec![review(id, 1)]))
}

pub fn stubs() -> Stubs {
    Stubs {
        products: Arc::new(products_stub()),
        recommendations: Arc::new(recommendations_stub()),
        reviews: Arc::new(reviews_stub()),
    }
}

/// In-memory leaves, as the three leaf services would hold them
pub struct Leaves {
    pub products: Arc<InMemoryResource<ProductResource>>,
    pub recommendations: Arc<InMemoryResource<RecommendationResource>>,
    pub reviews: Arc<InMemoryResource<ReviewResource>>,
}

pub fn empty_leaves() -> Leaves {
    Leaves {
        products: Arc::new(InMemoryResource::new(PRODUCT_ADDRESS)),
        recommendations: Arc::new(InMemoryResource::new(RECOMMENDATION_ADDRESS)),
        reviews: Arc::new(InMemoryResource::new(REVIEW_ADDRESS)),
    }
}

/// Products 5, 6 and 7; only 5 has a recommendation and a review
pub fn seeded_leaves() -> Leaves {
    Leaves {
        products: Arc::new(InMemoryResource::<ProductResource>::new(PRODUCT_ADDRESS).with_rows(vec![
            Product::new(5, "five", 5),
            Product::new(6, "six", 6),
            Product::new(7, "seven", 7),
        ])),
        recommendations: Arc::new(
            InMemoryResource::<RecommendationResource>::new(RECOMMENDATION_ADDRESS)
                .with_rows(vec![Recommendation::new(5, 1, "author", 4, "content")]),
        ),
        reviews: Arc::new(
            InMemoryResource::<ReviewResource>::new(REVIEW_ADDRESS)
                .with_rows(vec![Review::new(5, 1, "author", "subject", "content", 4)]),
        ),
    }
}

/// Records accepted messages; refuses everything sent to `failing`
pub struct FailingPublisher {
    failing: Channel,
    accepted: Mutex<Vec<OutboundMessage>>,
    attempts: AtomicUsize,
}

impl FailingPublisher {
    pub fn new(failing: Channel) -> Self {
        Self {
            failing,
            accepted: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub async fn accepted(&self) -> Vec<OutboundMessage> {
        self.accepted.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, message: OutboundMessage) -> PublishResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if message.channel == self.failing {
            return Err(PublishError::Ack(format!(
                "no responders on {}",
                message.channel
            )));
        }
        self.accepted.lock().await.push(message);
        Ok(())
    }
}

pub struct DownIndicator;

#[async_trait]
impl HealthIndicator for DownIndicator {
    async fn health(&self) -> Health {
        Health::down("Connection refused")
    }
}
