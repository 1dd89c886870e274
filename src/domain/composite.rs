// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composite view of a product with its recommendations and reviews
//!
//! [`ProductAggregate`] is built per request on the read path and decomposed
//! into per-resource create payloads on the write path. It is never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Product, Recommendation, Review};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub recommendation_id: i32,
    pub author: String,
    pub rate: i32,
    pub content: String,
}

impl RecommendationSummary {
    pub fn new(
        recommendation_id: i32,
        author: impl Into<String>,
        rate: i32,
        content: impl Into<String>,
    ) -> Self {
        Self {
            recommendation_id,
            author: author.into(),
            rate,
            content: content.into(),
        }
    }

    /// Create payload for the recommendation service
    pub fn to_recommendation(&self, product_id: i32) -> Recommendation {
        Recommendation::new(
            product_id,
            self.recommendation_id,
            self.author.clone(),
            self.rate,
            self.content.clone(),
        )
    }
}

impl From<&Recommendation> for RecommendationSummary {
    fn from(r: &Recommendation) -> Self {
        Self::new(r.recommendation_id, r.author.clone(), r.rate, r.content.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review_id: i32,
    pub author: String,
    pub subject: String,
    pub content: String,
    pub rating: i32,
}

impl ReviewSummary {
    pub fn new(
        review_id: i32,
        author: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
        rating: i32,
    ) -> Self {
        Self {
            review_id,
            author: author.into(),
            subject: subject.into(),
            content: content.into(),
            rating,
        }
    }

    /// Create payload for the review service. Summaries carry no date, so
    /// the caller supplies the one to record.
    pub fn to_review(&self, product_id: i32, date: NaiveDate) -> Review {
        Review::new(
            product_id,
            self.review_id,
            self.author.clone(),
            self.subject.clone(),
            self.content.clone(),
            self.rating,
        )
        .with_date(date)
    }
}

impl From<&Review> for ReviewSummary {
    fn from(r: &Review) -> Self {
        Self::new(
            r.review_id,
            r.author.clone(),
            r.subject.clone(),
            r.content.clone(),
            r.rating,
        )
    }
}

/// Which instance served each part of a composite read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAddresses {
    pub composite: String,
    pub product: String,
    pub review: String,
    pub recommendation: String,
}

/// Product with its recommendations and reviews.
///
/// On reads both sequences are always present (empty when the sub-resource
/// read failed). On writes an absent sequence means "nothing to create".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub product_id: i32,
    pub name: String,
    pub weight: i32,
    #[serde(default)]
    pub recommendations: Option<Vec<RecommendationSummary>>,
    #[serde(default)]
    pub reviews: Option<Vec<ReviewSummary>>,
    #[serde(default)]
    pub service_addresses: Option<ServiceAddresses>,
}

impl ProductAggregate {
    pub fn new(product_id: i32, name: impl Into<String>, weight: i32) -> Self {
        Self {
            product_id,
            name: name.into(),
            weight,
            recommendations: None,
            reviews: None,
            service_addresses: None,
        }
    }

    pub fn with_recommendations(mut self, recommendations: Vec<RecommendationSummary>) -> Self {
        self.recommendations = Some(recommendations);
        self
    }

    pub fn with_reviews(mut self, reviews: Vec<ReviewSummary>) -> Self {
        self.reviews = Some(reviews);
        self
    }

    /// Assemble the read-side composite.
    ///
    /// The review and recommendation addresses come from the first element of
    /// each sequence, or are empty when the sequence is.
    pub fn assemble(
        product: Product,
        recommendations: Vec<Recommendation>,
        reviews: Vec<Review>,
        composite_address: &str,
    ) -> Self {
        let recommendation_address = recommendations
            .first()
            .and_then(|r| r.service_address.clone())
            .unwrap_or_default();
        let review_address = reviews
            .first()
            .and_then(|r| r.service_address.clone())
            .unwrap_or_default();

        let service_addresses = ServiceAddresses {
            composite: composite_address.to_string(),
            product: product.service_address.clone().unwrap_or_default(),
            review: review_address,
            recommendation: recommendation_address,
        };

        Self {
            product_id: product.product_id,
            name: product.name,
            weight: product.weight,
            recommendations: Some(recommendations.iter().map(RecommendationSummary::from).collect()),
            reviews: Some(reviews.iter().map(ReviewSummary::from).collect()),
            service_addresses: Some(service_addresses),
        }
    }

    /// Create payload for the product service
    pub fn to_product(&self) -> Product {
        Product::new(self.product_id, self.name.clone(), self.weight)
    }

    pub fn to_recommendations(&self) -> Vec<Recommendation> {
        self.recommendations
            .iter()
            .flatten()
            .map(|r| r.to_recommendation(self.product_id))
            .collect()
    }

    pub fn to_reviews(&self, date: NaiveDate) -> Vec<Review> {
        self.reviews
            .iter()
            .flatten()
            .map(|r| r.to_review(self.product_id, date))
            .collect()
    }
}
