// Copyright (c) 2025 - Cowboy AI, Inc.
//! Product as owned by the product service

use serde::{Deserialize, Serialize};

/// A product. `service_address` identifies the leaf instance that served a
/// read and is never part of a create payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub weight: i32,
    #[serde(default)]
    pub service_address: Option<String>,
}

impl Product {
    pub fn new(product_id: i32, name: impl Into<String>, weight: i32) -> Self {
        Self {
            product_id,
            name: name.into(),
            weight,
            service_address: None,
        }
    }

    pub fn with_service_address(mut self, service_address: impl Into<String>) -> Self {
        self.service_address = Some(service_address.into());
        self
    }
}
