//! The denial response: a genuine not-found.
//!
//! Every denial surfaces as the same response a truly missing document
//! would get. No status, header, or body may differ between the two, or
//! restricted documents become discoverable by probing.

use axum::response::{IntoResponse, Response};
use http::{header, HeaderValue, StatusCode};

/// `Expires` value safely in the past, so shared caches drop any copy.
const EXPIRES_LONG_AGO: &str = "Wed, 11 Jan 1984 05:00:00 GMT";

const NO_CACHE: &str = "no-cache, must-revalidate, max-age=0";

/// Builds the not-found response used for every denied or missing document.
///
/// Carries no-cache headers: a denial must never be cached and served to
/// a later viewer who would have been allowed, nor the other way around.
/// Takes no message parameter on purpose, since any variation in the body
/// would leak which documents exist.
pub fn not_found_response() -> Response {
    let body = serde_json::json!({
        "error": {
            "category": "not_found",
            "message": "not found",
        }
    });

    let mut response = (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    headers.insert(header::EXPIRES, HeaderValue::from_static(EXPIRES_LONG_AGO));

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = not_found_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_is_uncacheable() {
        let response = not_found_response();
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-cache, must-revalidate, max-age=0"
        );
        assert_eq!(
            response.headers().get(header::EXPIRES).unwrap(),
            EXPIRES_LONG_AGO
        );
    }

    #[test]
    fn test_not_found_responses_are_identical() {
        // Denied and missing share this constructor; the only thing worth
        // pinning is that repeated calls cannot drift apart.
        let first = not_found_response();
        let second = not_found_response();
        assert_eq!(first.status(), second.status());
        assert_eq!(
            first.headers().get(header::CONTENT_TYPE),
            second.headers().get(header::CONTENT_TYPE)
        );
    }
}
