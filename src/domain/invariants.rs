// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Leaf Resource Invariants
//!
//! Rules a leaf resource applies before accepting a create. The composite does
//! not run these itself beyond the product id check; they describe what the
//! leaves (and the in-memory leaf used for tests and local runs) enforce.
//!
//! All functions are pure: no I/O, deterministic, explicit errors.

use crate::domain::{Product, Recommendation, Review};

/// Lowest and highest accepted rate/rating
pub const SCORE_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid productId: {0}")]
    InvalidProductId(i32),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be between 1 and 5, got {value}")]
    ScoreOutOfRange { field: &'static str, value: i32 },
}

/// Product ids are positive integers
pub fn validate_product_id(product_id: i32) -> ValidationResult {
    if product_id < 1 {
        return Err(ValidationError::InvalidProductId(product_id));
    }
    Ok(())
}

fn validate_not_empty(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

fn validate_score(field: &'static str, value: i32) -> ValidationResult {
    if !SCORE_RANGE.contains(&value) {
        return Err(ValidationError::ScoreOutOfRange { field, value });
    }
    Ok(())
}

pub fn validate_product(product: &Product) -> ValidationResult {
    validate_product_id(product.product_id)?;
    validate_not_empty("name", &product.name)
}

pub fn validate_recommendation(recommendation: &Recommendation) -> ValidationResult {
    validate_product_id(recommendation.product_id)?;
    validate_not_empty("author", &recommendation.author)?;
    validate_score("rate", recommendation.rate)
}

pub fn validate_review(review: &Review) -> ValidationResult {
    validate_product_id(review.product_id)?;
    validate_not_empty("author", &review.author)?;
    validate_not_empty("subject", &review.subject)?;
    validate_score("rating", review.rating)
}
