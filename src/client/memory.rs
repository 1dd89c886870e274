// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory leaf resource
//!
//! Applies the same rules a leaf service applies: invalid ids and duplicate
//! keys are rejected as invalid input, a missing product is not found, and
//! deleting rows that do not exist succeeds. Rows returned by reads carry the
//! address of the instance that served them.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Health, HealthIndicator, ProductCatalog, ProductResource, Resource, ResourceService};
use crate::domain::invariants::validate_product_id;
use crate::domain::Product;
use crate::errors::{CompositeError, CompositeResult};

pub struct InMemoryResource<R: Resource> {
    rows: RwLock<Vec<R::Item>>,
    service_address: String,
}

impl<R: Resource> InMemoryResource<R> {
    pub fn new(service_address: impl Into<String>) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            service_address: service_address.into(),
        }
    }

    /// Seed rows without validation
    pub fn with_rows(self, rows: Vec<R::Item>) -> Self {
        Self {
            rows: RwLock::new(rows),
            service_address: self.service_address,
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Rows of a product as stored, without the service address stamp
    pub async fn rows_for(&self, product_id: i32) -> Vec<R::Item> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| R::product_id(row) == product_id)
            .cloned()
            .collect()
    }
}

fn check_product_id(product_id: i32) -> CompositeResult<()> {
    validate_product_id(product_id).map_err(|e| CompositeError::InvalidInput(e.to_string()))
}

#[async_trait]
impl<R: Resource> ResourceService<R> for InMemoryResource<R> {
    async fn fetch(&self, product_id: i32) -> CompositeResult<R::Fetched> {
        check_product_id(product_id)?;

        let rows = self
            .rows_for(product_id)
            .await
            .into_iter()
            .map(|row| R::stamp(row, &self.service_address))
            .collect::<Vec<_>>();

        debug!(resource = R::NAME, product_id, count = rows.len(), "Rows fetched");

        R::collect(product_id, rows)
    }

    async fn create(&self, item: R::Item) -> CompositeResult<R::Item> {
        R::validate(&item).map_err(|e| CompositeError::InvalidInput(e.to_string()))?;

        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| R::same_key(row, &item)) {
            return Err(CompositeError::InvalidInput(R::duplicate_message(&item)));
        }

        rows.push(item.clone());
        debug!(resource = R::NAME, product_id = R::product_id(&item), "Row created");

        Ok(R::stamp(item, &self.service_address))
    }

    async fn delete(&self, product_id: i32) -> CompositeResult<()> {
        check_product_id(product_id)?;

        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| R::product_id(row) != product_id);

        debug!(
            resource = R::NAME,
            product_id,
            removed = before - rows.len(),
            "Rows deleted"
        );
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryResource<ProductResource> {
    async fn fetch_all(&self) -> CompositeResult<Vec<Product>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .cloned()
            .map(|row| row.with_service_address(self.service_address.as_str()))
            .collect())
    }
}

#[async_trait]
impl<R: Resource> HealthIndicator for InMemoryResource<R> {
    async fn health(&self) -> Health {
        Health::up()
    }
}
