// Copyright (c) 2025 - Cowboy AI, Inc.
//! Product Composite Service
//!
//! Serves the composite HTTP API. Reads fan out to the product,
//! recommendation and review services over HTTP; creates and deletes are
//! published to NATS JetStream for the leaf services to apply.
//!
//! Prerequisites:
//! 1. NATS server with JetStream enabled (NATS_URL, default localhost:4222)
//! 2. Leaf services reachable (PRODUCT_SERVICE_URL, RECOMMENDATION_SERVICE_URL,
//!    REVIEW_SERVICE_URL)

use anyhow::{Context, Result};
use product_composite::{
    api::{self, AppState},
    client::{http::build_http_client, HealthIndicator},
    config::CompositeConfig,
    jetstream::ensure_event_stream,
    CompositeCommandCoordinator, HttpResourceClient, JetStreamEventPublisher, NatsClient,
    ProductAggregator, ProductResource, RecommendationResource, ReviewResource,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("🚀 Starting Product Composite Service");

    let config = CompositeConfig::from_env().context("Invalid configuration")?;
    info!("📋 Configuration loaded:");
    info!("  - Bind address: {}", config.bind_addr);
    info!("  - Service address: {}", config.service_address);
    info!("  - Product service: {}", config.leaves.product);
    info!("  - Recommendation service: {}", config.leaves.recommendation);
    info!("  - Review service: {}", config.leaves.review);
    info!("  - NATS: {:?}", config.nats.servers);
    info!("  - Stream: {}", config.stream.stream_name);

    let nats = NatsClient::new(config.nats.clone())
        .await
        .context("Failed to connect to NATS")?;

    let jetstream = nats.jetstream();
    ensure_event_stream(&jetstream, config.stream.clone())
        .await
        .context("Failed to set up the event stream")?;
    info!("✅ Event stream ready: {}", config.stream.stream_name);

    let http = build_http_client(config.http_timeout).context("Failed to create HTTP client")?;
    let products = Arc::new(HttpResourceClient::<ProductResource>::with_client(
        http.clone(),
        config.leaves.product.clone(),
    ));
    let recommendations = Arc::new(HttpResourceClient::<RecommendationResource>::with_client(
        http.clone(),
        config.leaves.recommendation.clone(),
    ));
    let reviews = Arc::new(HttpResourceClient::<ReviewResource>::with_client(
        http,
        config.leaves.review.clone(),
    ));

    let health_indicators: Vec<(String, Arc<dyn HealthIndicator>)> = vec![
        ("product".to_string(), products.clone() as Arc<dyn HealthIndicator>),
        ("recommendation".to_string(), recommendations.clone() as Arc<dyn HealthIndicator>),
        ("review".to_string(), reviews.clone() as Arc<dyn HealthIndicator>),
    ];

    let state = Arc::new(AppState {
        aggregator: ProductAggregator::new(
            products,
            recommendations,
            reviews,
            config.service_address.clone(),
        ),
        coordinator: CompositeCommandCoordinator::new(Arc::new(
            JetStreamEventPublisher::from_context(jetstream),
        )),
        health_indicators,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎧 Listening on {}", config.bind_addr);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("👋 Product Composite Service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ Failed to listen for shutdown signal: {}", e);
    }
}
