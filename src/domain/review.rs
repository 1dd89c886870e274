// Copyright (c) 2025 - Cowboy AI, Inc.
//! Review as owned by the review service

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub product_id: i32,
    pub review_id: i32,
    pub author: String,
    pub subject: String,
    pub content: String,
    pub rating: i32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub service_address: Option<String>,
}

impl Review {
    pub fn new(
        product_id: i32,
        review_id: i32,
        author: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
        rating: i32,
    ) -> Self {
        Self {
            product_id,
            review_id,
            author: author.into(),
            subject: subject.into(),
            content: content.into(),
            rating,
            date: None,
            service_address: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_service_address(mut self, service_address: impl Into<String>) -> Self {
        self.service_address = Some(service_address.into());
        self
    }
}
