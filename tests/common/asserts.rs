use super::headers::{header_value, vary_values};
use std::collections::HashSet;
use vary_cors::constants::header;
use vary_cors::{CorsResult, Headers};

pub fn assert_simple(result: CorsResult) -> Headers {
    assert!(
        !result.end_response,
        "expected the request to continue, got {result:?}"
    );
    assert!(result.status.is_none(), "actual requests must keep the status");
    result.headers
}

pub fn assert_preflight(result: CorsResult) -> Headers {
    assert!(result.end_response, "expected a preflight result, got {result:?}");
    assert_eq!(result.status, Some(204));
    result.headers
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "unexpected value for {name}"
    );
}

pub fn assert_vary_eq<I, S>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let expected: HashSet<String> = expected.into_iter().map(Into::into).collect();
    assert_eq!(vary_values(headers), expected);
    if expected.len() > 1 {
        let raw = header_value(headers, header::VARY).unwrap_or_default();
        assert_eq!(raw.matches(", ").count(), expected.len() - 1);
    }
}

pub fn assert_vary_contains(headers: &Headers, name: &str) {
    assert!(
        vary_values(headers).contains(name),
        "expected Vary to contain {name}"
    );
}

pub fn assert_vary_not_contains(headers: &Headers, name: &str) {
    assert!(
        !vary_values(headers).contains(name),
        "expected Vary not to contain {name}"
    );
}
