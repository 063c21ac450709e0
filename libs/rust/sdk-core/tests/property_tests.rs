//! Property-based tests for sdk-core.
//!
//! These tests verify request building and error classification across
//! generated inputs using proptest.

use proptest::prelude::*;
use reqwest::Method;
use sdk_core::{ApiRequest, CoreError, DetailedResponse, RetryConfig, RetryPolicy};
use std::time::Duration;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,16}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A list-valued query parameter is the comma-join of its elements, in order.
    #[test]
    fn prop_list_query_is_comma_join(values in prop::collection::vec(segment_strategy(), 1..6)) {
        let request = ApiRequest::new(Method::GET, "/api/v1/secrets", &[])
            .unwrap()
            .query_list("groups", &values);
        let expected = format!("groups={}", values.join(","));
        prop_assert_eq!(request.query_string(), Some(expected));
    }

    /// Query values decode back to themselves, and spaces are never sent as `+`.
    #[test]
    fn prop_query_value_round_trips(value in "[a-zA-Z0-9 &=/?+%,-]{1,16}") {
        let request = ApiRequest::new(Method::GET, "/api/v1/secrets", &[])
            .unwrap()
            .query("search", &value);
        let query = request.query_string().unwrap();
        prop_assert!(!query.contains('+'), "unescaped plus in {}", query);
        prop_assert!(!query.contains(' '), "raw space in {}", query);
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        prop_assert_eq!(pairs, vec![("search".to_string(), value)]);
    }

    /// Path parameters land in the position named by the template.
    #[test]
    fn prop_path_params_substituted(kind in segment_strategy(), id in segment_strategy()) {
        let request = ApiRequest::new(
            Method::DELETE,
            "/api/v1/secrets/{secret_type}/{id}",
            &[("secret_type", kind.as_str()), ("id", id.as_str())],
        )
        .unwrap();
        prop_assert_eq!(request.path(), format!("/api/v1/secrets/{kind}/{id}"));
        let url = request.url("https://sm.example.com").unwrap();
        prop_assert_eq!(url.path(), format!("/api/v1/secrets/{kind}/{id}"));
    }

    /// Any empty path parameter is rejected before a URL exists.
    #[test]
    fn prop_empty_param_rejected(id in segment_strategy(), empty_first in any::<bool>()) {
        let (kind, id) = if empty_first { ("", id.as_str()) } else { ("arbitrary", "") };
        let result = ApiRequest::new(
            Method::GET,
            "/api/v1/secrets/{secret_type}/{id}",
            &[("secret_type", kind), ("id", id)],
        );
        prop_assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    /// Only throttling and gateway statuses are retryable.
    #[test]
    fn prop_status_retryability(status in 400u16..600) {
        let err = CoreError::status(DetailedResponse::new(status, Default::default(), Vec::new()));
        let expected = matches!(status, 429 | 502 | 503 | 504);
        prop_assert_eq!(err.is_retryable(), expected);
    }

    /// Backoff never exceeds the configured cap.
    #[test]
    fn prop_delay_capped(attempt in 0u32..64, cap_ms in 1u64..10_000) {
        let policy = RetryPolicy::new(
            RetryConfig::default().with_max_delay(Duration::from_millis(cap_ms)),
        );
        prop_assert!(policy.delay_for_attempt(attempt) <= Duration::from_millis(cap_ms));
    }
}
