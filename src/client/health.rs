// Copyright (c) 2025 - Cowboy AI, Inc.
//! Liveness reporting for the leaf services

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Health {
    pub fn up() -> Self {
        Self {
            status: HealthStatus::Up,
            error: None,
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Down,
            error: Some(error.into()),
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == HealthStatus::Up
    }
}

#[async_trait]
pub trait HealthIndicator: Send + Sync {
    /// Probe; never fails, a failed probe is reported as DOWN
    async fn health(&self) -> Health;
}

/// Overall status plus one entry per probed component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeHealth {
    pub status: HealthStatus,
    pub components: BTreeMap<String, Health>,
}

impl CompositeHealth {
    /// Probe every component concurrently. DOWN if any component is DOWN.
    pub async fn check(indicators: &[(String, Arc<dyn HealthIndicator>)]) -> Self {
        let probes = indicators.iter().map(|(name, indicator)| async move {
            (name.clone(), indicator.health().await)
        });

        let components: BTreeMap<String, Health> = join_all(probes).await.into_iter().collect();

        let status = if components.values().all(Health::is_up) {
            HealthStatus::Up
        } else {
            HealthStatus::Down
        };

        Self { status, components }
    }
}
