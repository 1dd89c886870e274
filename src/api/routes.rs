// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composite API handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, OriginalUri, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::errors::ApiError;
use super::AppState;
use crate::client::{CompositeHealth, HealthStatus};
use crate::domain::ProductAggregate;

fn parse_product_id(raw: &str, path: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::bad_request(path, format!("Type mismatch: productId '{}' is not a number", raw)))
}

pub async fn list_composites(
    Extension(state): Extension<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    match state.aggregator.get_all_aggregates().await {
        Ok(aggregates) => Json(aggregates).into_response(),
        Err(e) => ApiError::from_composite(e, uri.path()).into_response(),
    }
}

pub async fn get_composite(
    Extension(state): Extension<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Path(product_id): Path<String>,
) -> Response {
    let product_id = match parse_product_id(&product_id, uri.path()) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.aggregator.get_aggregate(product_id).await {
        Ok(aggregate) => Json(aggregate).into_response(),
        Err(e) => ApiError::from_composite(e, uri.path()).into_response(),
    }
}

pub async fn create_composite(
    Extension(state): Extension<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<ProductAggregate>, JsonRejection>,
) -> Response {
    let Json(aggregate) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ApiError::bad_request(uri.path(), rejection.body_text()).into_response()
        }
    };

    match state.coordinator.create_aggregate(&aggregate).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => ApiError::from_composite(e, uri.path()).into_response(),
    }
}

pub async fn delete_composite(
    Extension(state): Extension<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Path(product_id): Path<String>,
) -> Response {
    let product_id = match parse_product_id(&product_id, uri.path()) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match state.coordinator.delete_aggregate(product_id).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => ApiError::from_composite(e, uri.path()).into_response(),
    }
}

pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Response {
    let health = CompositeHealth::check(&state.health_indicators).await;

    let status = match health.status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(health)).into_response()
}
