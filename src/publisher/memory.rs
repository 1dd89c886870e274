// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-process event channels
//!
//! Keeps published messages in per-channel FIFO queues until drained. Order
//! within a channel is publish order, which preserves per-key ordering the
//! same way a single partition would.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;
use tracing::debug;

use super::{EventPublisher, OutboundMessage};
use crate::errors::PublishResult;
use crate::subjects::Channel;

#[derive(Default)]
pub struct InMemoryEventPublisher {
    queues: Mutex<HashMap<Channel, VecDeque<OutboundMessage>>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued message of a channel, oldest first
    pub async fn drain(&self, channel: Channel) -> Vec<OutboundMessage> {
        let mut queues = self.queues.lock().await;
        queues
            .get_mut(&channel)
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Copy of the queued messages of a channel, oldest first
    pub async fn messages(&self, channel: Channel) -> Vec<OutboundMessage> {
        let queues = self.queues.lock().await;
        queues
            .get(&channel)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Drop everything queued on every channel
    pub async fn purge(&self) {
        self.queues.lock().await.clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, message: OutboundMessage) -> PublishResult<()> {
        debug!(
            channel = %message.channel,
            partition_key = %message.partition_key,
            event_type = %message.event_type,
            "Queued event"
        );

        self.queues
            .lock()
            .await
            .entry(message.channel)
            .or_default()
            .push_back(message);

        Ok(())
    }
}
