// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP surface of the composite
//!
//! | Method | Path                          | Success                 |
//! |--------|-------------------------------|-------------------------|
//! | GET    | `/product-composite`          | 200, list of aggregates |
//! | GET    | `/product-composite/:productId` | 200, one aggregate    |
//! | POST   | `/product-composite`          | 202, events accepted    |
//! | DELETE | `/product-composite/:productId` | 202, events accepted  |
//! | GET    | `/actuator/health`            | 200 UP / 503 DOWN       |
//!
//! Every error body is an [`HttpErrorInfo`](crate::errors::HttpErrorInfo)
//! carrying the request path.

pub mod errors;
pub mod routes;

pub use errors::ApiError;

use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::get;
use axum::Router;

use crate::client::HealthIndicator;
use crate::service::{CompositeCommandCoordinator, ProductAggregator};

/// Shared handler state
pub struct AppState {
    pub aggregator: ProductAggregator,
    pub coordinator: CompositeCommandCoordinator,
    /// Named probes reported under `components`
    pub health_indicators: Vec<(String, Arc<dyn HealthIndicator>)>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/product-composite",
            get(routes::list_composites).post(routes::create_composite),
        )
        .route(
            "/product-composite/:product_id",
            get(routes::get_composite).delete(routes::delete_composite),
        )
        .route("/actuator/health", get(routes::health))
        .layer(Extension(state))
}
