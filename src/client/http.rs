// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP client for a leaf resource service
//!
//! Issues exactly one outbound call per operation. A non-success status is
//! captured together with its body and handed to
//! [`classify`](crate::classifier::classify); nothing is retried here.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Health, HealthIndicator, ProductCatalog, ProductResource, Resource, ResourceService};
use crate::classifier::{classify, TransportFailure};
use crate::domain::Product;
use crate::errors::{CompositeError, CompositeResult};

/// Path of the leaf liveness endpoint
const HEALTH_PATH: &str = "/actuator/health";

/// Build the shared outbound HTTP client
pub fn build_http_client(timeout: Duration) -> Result<Client, TransportFailure> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TransportFailure::Other(format!("Failed to create HTTP client: {}", e)))
}

/// REST client for one leaf resource
pub struct HttpResourceClient<R> {
    client: Client,
    base_url: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for HttpResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> HttpResourceClient<R> {
    /// Client over an existing connection pool
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            _resource: PhantomData,
        }
    }

    /// Client with its own connection pool
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportFailure> {
        Ok(Self::with_client(build_http_client(timeout)?, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, TransportFailure> {
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(
                    resource = R::NAME,
                    status = status.as_u16(),
                    error = %e,
                    "Failed to read error body"
                );
                String::new()
            }
        };
        Err(TransportFailure::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn fail(&self, operation: &'static str, url: &str, failure: TransportFailure) -> CompositeError {
        let error = classify(failure);
        if error.is_transient() {
            warn!(
                resource = R::NAME,
                operation,
                url,
                error = %error,
                "Downstream call failed"
            );
        } else {
            debug!(
                resource = R::NAME,
                operation,
                url,
                error = %error,
                "Downstream call rejected"
            );
        }
        error
    }
}

#[async_trait]
impl<R: Resource> ResourceService<R> for HttpResourceClient<R> {
    async fn fetch(&self, product_id: i32) -> CompositeResult<R::Fetched> {
        let url = self.url(&R::fetch_path(product_id));
        debug!("Will call the fetch API on URL: {}", url);

        let response = self
            .send(self.client.get(&url))
            .await
            .map_err(|f| self.fail("fetch", &url, f))?;

        response
            .json::<R::Fetched>()
            .await
            .map_err(|e| self.fail("fetch", &url, e.into()))
    }

    async fn create(&self, item: R::Item) -> CompositeResult<R::Item> {
        let url = self.url(R::COLLECTION_PATH);
        debug!("Will post a new {} to URL: {}", R::NAME, url);

        let response = self
            .send(self.client.post(&url).json(&item))
            .await
            .map_err(|f| self.fail("create", &url, f))?;

        response
            .json::<R::Item>()
            .await
            .map_err(|e| self.fail("create", &url, e.into()))
    }

    async fn delete(&self, product_id: i32) -> CompositeResult<()> {
        let url = self.url(&R::delete_path(product_id));
        debug!("Will call the delete API on URL: {}", url);

        self.send(self.client.delete(&url))
            .await
            .map_err(|f| self.fail("delete", &url, f))?;

        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for HttpResourceClient<ProductResource> {
    async fn fetch_all(&self) -> CompositeResult<Vec<Product>> {
        let url = self.url(ProductResource::COLLECTION_PATH);
        debug!("Will call the list API on URL: {}", url);

        let response = self
            .send(self.client.get(&url))
            .await
            .map_err(|f| self.fail("fetch_all", &url, f))?;

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| self.fail("fetch_all", &url, e.into()))
    }
}

#[async_trait]
impl<R: Resource> HealthIndicator for HttpResourceClient<R> {
    async fn health(&self) -> Health {
        let url = self.url(HEALTH_PATH);

        match self.send(self.client.get(&url)).await {
            Ok(_) => {
                debug!(resource = R::NAME, "Health check passed");
                Health::up()
            }
            Err(failure) => {
                warn!(resource = R::NAME, error = %failure, "Health check failed");
                Health::down(failure.to_string())
            }
        }
    }
}
