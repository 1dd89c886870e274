// Copyright (c) 2025 - Cowboy AI, Inc.
//! Read path: fan-out over the three leaf resources and merge
//!
//! ```text
//!                 ┌── product (load-bearing) ──────────┐
//! get_aggregate ──┼── recommendations (best-effort) ───┼── assemble
//!                 └── reviews (best-effort) ───────────┘
//! ```
//!
//! The three reads start together. A failed product read fails the aggregate
//! and drops the outstanding sub-reads; a failed sub-read is logged and
//! replaced with an empty sequence.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::client::{
    ProductService, RecommendationResource, Resource, ResourceService, ReviewResource,
};
use crate::domain::invariants::validate_product_id;
use crate::domain::ProductAggregate;
use crate::errors::{CompositeError, CompositeResult};

/// Products whose sub-reads may be in flight at once while listing
pub const DEFAULT_LISTING_CONCURRENCY: usize = 256;

/// Builds product aggregates from the leaf resources
#[derive(Clone)]
pub struct ProductAggregator {
    products: Arc<dyn ProductService>,
    recommendations: Arc<dyn ResourceService<RecommendationResource>>,
    reviews: Arc<dyn ResourceService<ReviewResource>>,
    service_address: String,
    listing_concurrency: usize,
}

impl ProductAggregator {
    /// `service_address` identifies this composite instance in every
    /// aggregate it returns
    pub fn new(
        products: Arc<dyn ProductService>,
        recommendations: Arc<dyn ResourceService<RecommendationResource>>,
        reviews: Arc<dyn ResourceService<ReviewResource>>,
        service_address: impl Into<String>,
    ) -> Self {
        Self {
            products,
            recommendations,
            reviews,
            service_address: service_address.into(),
            listing_concurrency: DEFAULT_LISTING_CONCURRENCY,
        }
    }

    /// Bound the number of products assembled concurrently by
    /// [`get_all_aggregates`](Self::get_all_aggregates); at least one
    pub fn with_listing_concurrency(mut self, limit: usize) -> Self {
        self.listing_concurrency = limit.max(1);
        self
    }

    pub fn service_address(&self) -> &str {
        &self.service_address
    }

    /// Aggregate of one product
    ///
    /// Fails with InvalidInput for ids below 1 without calling any leaf.
    /// NotFound and InvalidInput from the product read are returned as is.
    pub async fn get_aggregate(&self, product_id: i32) -> CompositeResult<ProductAggregate> {
        info!(product_id, "Will get composite product info");

        validate_product_id(product_id)
            .map_err(|_| CompositeError::invalid_product_id(product_id))?;

        let (product, recommendations, reviews) = tokio::try_join!(
            self.products.fetch(product_id),
            async {
                Ok::<_, CompositeError>(
                    best_effort(self.recommendations.as_ref(), product_id).await,
                )
            },
            async { Ok::<_, CompositeError>(best_effort(self.reviews.as_ref(), product_id).await) },
        )?;

        debug!(
            product_id,
            recommendations = recommendations.len(),
            reviews = reviews.len(),
            "Assembling product aggregate"
        );

        Ok(ProductAggregate::assemble(
            product,
            recommendations,
            reviews,
            &self.service_address,
        ))
    }

    /// Aggregates of every listed product, in listing order
    ///
    /// The listing is load-bearing. Each product's sub-reads are best-effort;
    /// at most `listing_concurrency` products have reads in flight at a time.
    pub async fn get_all_aggregates(&self) -> CompositeResult<Vec<ProductAggregate>> {
        info!("Will get composite info for all products");

        let products = self.products.fetch_all().await?;

        let aggregates = stream::iter(products)
            .map(|product| async move {
                let product_id = product.product_id;
                let (recommendations, reviews) = tokio::join!(
                    best_effort(self.recommendations.as_ref(), product_id),
                    best_effort(self.reviews.as_ref(), product_id),
                );
                ProductAggregate::assemble(product, recommendations, reviews, &self.service_address)
            })
            .buffered(self.listing_concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(aggregates)
    }
}

/// Read that never fails; any error becomes the empty result
async fn best_effort<R>(service: &dyn ResourceService<R>, product_id: i32) -> R::Fetched
where
    R: Resource,
    R::Fetched: Default,
{
    match service.fetch(product_id).await {
        Ok(fetched) => fetched,
        Err(error) => {
            warn!(
                resource = R::NAME,
                product_id,
                error = %error,
                "Sub-resource read failed, returning empty result"
            );
            R::Fetched::default()
        }
    }
}
