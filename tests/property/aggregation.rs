// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of the read path

use std::sync::Arc;

use product_composite::client::ResourceService;
use product_composite::domain::{Product, Recommendation};
use product_composite::ProductAggregator;
use proptest::prelude::*;

use crate::fixtures::*;

fn aggregator(stubs: &Stubs) -> ProductAggregator {
    ProductAggregator::new(
        stubs.products.clone(),
        stubs.recommendations.clone(),
        stubs.reviews.clone(),
        COMPOSITE_ADDRESS,
    )
}

proptest! {
    /// Non-positive ids never reach a leaf
    #[test]
    fn prop_non_positive_ids_are_rejected_locally(product_id in i32::MIN..=0) {
        let stubs = stubs();

        let result = tokio_test::block_on(aggregator(&stubs).get_aggregate(product_id));

        prop_assert!(result.unwrap_err().is_invalid_input());
        prop_assert_eq!(stubs.total_calls(), 0);
    }

    /// Every recommendation the leaf holds for the product appears in the
    /// aggregate, in leaf order
    #[test]
    fn prop_all_recommendations_are_merged(product_id in 1i32..1000, count in 0usize..20) {
        let leaves = empty_leaves();

        let aggregate = tokio_test::block_on(async {
            leaves.products.create(Product::new(product_id, "name", 1)).await.unwrap();
            for recommendation_id in 0..count as i32 {
                leaves
                    .recommendations
                    .create(Recommendation::new(product_id, recommendation_id, "a", 3, "c"))
                    .await
                    .unwrap();
            }

            ProductAggregator::new(
                leaves.products.clone(),
                leaves.recommendations.clone(),
                leaves.reviews.clone(),
                COMPOSITE_ADDRESS,
            )
            .get_aggregate(product_id)
            .await
            .unwrap()
        });

        let ids: Vec<i32> = aggregate
            .recommendations
            .unwrap_or_default()
            .iter()
            .map(|r| r.recommendation_id)
            .collect();
        prop_assert_eq!(ids, (0..count as i32).collect::<Vec<_>>());
        prop_assert_eq!(aggregate.reviews, Some(vec![]));
    }
}

#[test]
fn test_leaves_are_independent_per_product() {
    let leaves = empty_leaves();
    let products = Arc::clone(&leaves.products);

    tokio_test::block_on(async {
        products.create(Product::new(1, "one", 1)).await.unwrap();
        assert!(products.fetch(2).await.unwrap_err().is_not_found());
    });
}
