// Copyright (c) 2025 - Cowboy AI, Inc.
//! Properties of the transport failure classifier

use product_composite::{classify, CompositeError, HttpErrorInfo, TransportFailure};
use proptest::prelude::*;

fn status(status: u16, body: String) -> TransportFailure {
    TransportFailure::Status { status, body }
}

proptest! {
    /// Only 404 and 422 are terminal; every other status is transient
    #[test]
    fn prop_other_statuses_are_transient(code in 100u16..600, body in ".*") {
        prop_assume!(code != 404 && code != 422);

        let error = classify(status(code, body));

        prop_assert!(error.is_transient());
    }

    /// The message of a structured error body is surfaced verbatim
    #[test]
    fn prop_error_body_message_is_preserved(message in "[a-zA-Z0-9 :]{1,40}", path in "/[a-z]{1,10}") {
        let body = serde_json::to_string(&HttpErrorInfo::new(404, path, message.clone())).unwrap();

        match classify(status(404, body)) {
            CompositeError::NotFound(m) => prop_assert_eq!(m, message),
            other => prop_assert!(false, "expected NotFound, got {:?}", other),
        }
    }

    /// Same failure, same class
    #[test]
    fn prop_classification_is_deterministic(code in 100u16..600, body in ".*") {
        let first = classify(status(code, body.clone()));
        let second = classify(status(code, body));

        prop_assert_eq!(first.to_string(), second.to_string());
        prop_assert_eq!(first.is_not_found(), second.is_not_found());
        prop_assert_eq!(first.is_invalid_input(), second.is_invalid_input());
    }

    #[test]
    fn prop_timeouts_and_refusals_are_transient(reason in ".*") {
        prop_assert!(classify(TransportFailure::Timeout(reason.clone())).is_transient());
        prop_assert!(classify(TransportFailure::Connect(reason)).is_transient());
    }
}
