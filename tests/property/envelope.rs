// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of the event envelope encoding

use std::fmt::Debug;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use product_composite::domain::{Product, Recommendation, Review};
use product_composite::events::{is_same_event_json, EventEnvelope, EventType};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use serde::de::DeserializeOwned;
use serde::Serialize;

fn arb_product() -> impl Strategy<Value = Product> {
    (1i32..=i32::MAX, "[a-zA-Z ]{1,20}", 0i32..10_000)
        .prop_map(|(id, name, weight)| Product::new(id, name, weight))
}

fn arb_recommendation() -> impl Strategy<Value = Recommendation> {
    (1i32..=i32::MAX, 0i32..1000, "[a-zA-Z]{1,10}", 1i32..=5, ".{0,40}").prop_map(
        |(product_id, recommendation_id, author, rate, content)| {
            Recommendation::new(product_id, recommendation_id, author, rate, content)
        },
    )
}

fn arb_date() -> impl Strategy<Value = Option<NaiveDate>> {
    proptest::option::of((0i64..100_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Duration::days(days)
    }))
}

fn arb_review() -> impl Strategy<Value = Review> {
    (
        (1i32..=i32::MAX, 0i32..1000, "[a-zA-Z]{1,10}"),
        ("[a-zA-Z ]{1,20}", ".{0,40}", 1i32..=5, arb_date()),
    )
        .prop_map(|((product_id, review_id, author), (subject, content, rating, date))| {
            let review = Review::new(product_id, review_id, author, subject, content, rating);
            match date {
                Some(date) => review.with_date(date),
                None => review,
            }
        })
}

/// Encode, decode and compare everything but the creation time
fn assert_round_trip<T>(data: T, key: i32, delete: bool) -> Result<(), TestCaseError>
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let event = if delete {
        EventEnvelope::delete(key)
    } else {
        EventEnvelope::create(key, data)
    };

    let payload = serde_json::to_vec(&event).unwrap();
    let decoded: EventEnvelope<i32, T> = serde_json::from_slice(&payload).unwrap();

    prop_assert_eq!(decoded.data().is_some(), decoded.event_type() == EventType::Create);
    prop_assert_eq!(decoded.event_type(), event.event_type());
    prop_assert_eq!(decoded.key(), event.key());
    prop_assert_eq!(decoded.data(), event.data());
    prop_assert!(decoded.same_event_except_created_at(&event));
    Ok(())
}

fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

proptest! {
    /// Envelopes that differ only in creation time are the same event
    #[test]
    fn prop_created_at_is_ignored(product in arb_product(), a in arb_timestamp(), b in arb_timestamp()) {
        let first = EventEnvelope::create(product.product_id, product.clone()).with_created_at(a);
        let second = EventEnvelope::create(product.product_id, product).with_created_at(b);

        let payload = serde_json::to_vec(&first).unwrap();

        prop_assert!(is_same_event_json(&payload, &second));
        prop_assert!(first.same_event_except_created_at(&second));
    }

    /// A different key is a different event
    #[test]
    fn prop_key_is_compared(key in 1i32..1000, other in 1000i32..2000) {
        let expected: EventEnvelope<i32, Product> = EventEnvelope::delete(key);
        let actual: EventEnvelope<i32, Product> = EventEnvelope::delete(other);

        let payload = serde_json::to_vec(&actual).unwrap();

        prop_assert!(!is_same_event_json(&payload, &expected));
    }

    /// Type, key and data survive encoding; data is present exactly for CREATE
    #[test]
    fn prop_product_envelope_round_trips(product in arb_product(), delete in any::<bool>()) {
        let key = product.product_id;
        assert_round_trip(product, key, delete)?;
    }

    #[test]
    fn prop_recommendation_envelope_round_trips(recommendation in arb_recommendation(), delete in any::<bool>()) {
        let key = recommendation.product_id;
        assert_round_trip(recommendation, key, delete)?;
    }

    /// Reviews carry a date, which must survive as well
    #[test]
    fn prop_review_envelope_round_trips(review in arb_review(), delete in any::<bool>()) {
        let key = review.product_id;
        assert_round_trip(review, key, delete)?;
    }
}
