// Copyright (c) 2025 - Cowboy AI, Inc.
//! Write path: decompose composite commands into leaf events
//!
//! Every event is keyed by the product id, which is also the partition key,
//! so a consumer sees the events of one product in emission order.
//!
//! Publishing is all-or-error: every envelope is encoded before the first
//! send, and the operation fails if any send is not acknowledged. The call
//! returns once the broker accepted the events, not once the leaves applied
//! them.

use chrono::{NaiveDate, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::invariants::validate_product_id;
use crate::domain::{Product, ProductAggregate, Recommendation, Review};
use crate::errors::{CompositeError, CompositeResult};
use crate::events::EventEnvelope;
use crate::publisher::{EventPublisher, OutboundMessage};
use crate::subjects::Channel;

/// Emits create and delete events for composite writes
#[derive(Clone)]
pub struct CompositeCommandCoordinator {
    publisher: Arc<dyn EventPublisher>,
}

impl CompositeCommandCoordinator {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// One product CREATE plus one CREATE per recommendation and review.
    /// Reviews are dated today (UTC).
    pub async fn create_aggregate(&self, aggregate: &ProductAggregate) -> CompositeResult<()> {
        self.create_aggregate_on(aggregate, Utc::now().date_naive())
            .await
    }

    /// Same as [`create_aggregate`](Self::create_aggregate) with an explicit
    /// review date
    pub async fn create_aggregate_on(
        &self,
        aggregate: &ProductAggregate,
        review_date: NaiveDate,
    ) -> CompositeResult<()> {
        let product_id = aggregate.product_id;
        info!(product_id, "Will create a new composite entity");

        validate_product_id(product_id)
            .map_err(|_| CompositeError::invalid_product_id(product_id))?;

        let mut messages = vec![create_message::<Product>(
            Channel::Products,
            product_id,
            aggregate.to_product(),
        )?];

        for recommendation in aggregate.to_recommendations() {
            messages.push(create_message::<Recommendation>(
                Channel::Recommendations,
                product_id,
                recommendation,
            )?);
        }

        for review in aggregate.to_reviews(review_date) {
            messages.push(create_message::<Review>(Channel::Reviews, product_id, review)?);
        }

        self.dispatch(product_id, messages).await
    }

    /// DELETE on all three channels. Succeeds for products that do not exist.
    pub async fn delete_aggregate(&self, product_id: i32) -> CompositeResult<()> {
        info!(product_id, "Will delete a product aggregate");

        validate_product_id(product_id)
            .map_err(|_| CompositeError::invalid_product_id(product_id))?;

        let messages = vec![
            delete_message::<Product>(Channel::Products, product_id)?,
            delete_message::<Recommendation>(Channel::Recommendations, product_id)?,
            delete_message::<Review>(Channel::Reviews, product_id)?,
        ];

        self.dispatch(product_id, messages).await
    }

    async fn dispatch(&self, product_id: i32, messages: Vec<OutboundMessage>) -> CompositeResult<()> {
        let count = messages.len();

        try_join_all(messages.into_iter().map(|message| self.publisher.publish(message)))
            .await
            .map_err(|error| {
                warn!(product_id, error = %error, "Event publish failed");
                CompositeError::Publish(error)
            })?;

        debug!(product_id, count, "Events accepted by the broker");
        Ok(())
    }
}

fn create_message<T: Serialize>(
    channel: Channel,
    product_id: i32,
    data: T,
) -> CompositeResult<OutboundMessage> {
    Ok(OutboundMessage::from_event(
        channel,
        &EventEnvelope::create(product_id, data),
    )?)
}

fn delete_message<T: Serialize>(channel: Channel, product_id: i32) -> CompositeResult<OutboundMessage> {
    let event: EventEnvelope<i32, T> = EventEnvelope::delete(product_id);
    Ok(OutboundMessage::from_event(channel, &event)?)
}
