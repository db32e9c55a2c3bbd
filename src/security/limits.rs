//! Request limits.
//!
//! # Responsibilities
//! - Cap the request body size read by extractors
//! - Enforce a total request timeout (408 Request Timeout)
//!
//! An oversized body is not answered here. Extractors see it as a rejection,
//! so the POST handler still drops the submission and redirects.

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::timeout::TimeoutLayer;

use crate::config::BoardConfig;

/// Worst case for one character in a urlencoded form: 4 UTF-8 bytes, each
/// percent-encoded.
const MAX_ENCODED_CHAR_BYTES: usize = 12;

/// Field names, separators and the CSRF token.
const FORM_OVERHEAD_BYTES: usize = 1024;

/// Body limit in bytes: the configured size, raised so that a message of
/// exactly `max_message_length` characters always fits.
pub fn body_limit(config: &BoardConfig) -> usize {
    let longest_message = config
        .board
        .max_message_length
        .saturating_mul(MAX_ENCODED_CHAR_BYTES)
        .saturating_add(FORM_OVERHEAD_BYTES);
    config.security.max_body_size.max(longest_message)
}

/// Apply body size and timeout limits to `router`.
#[allow(deprecated)]
pub fn with_request_limits(router: Router, config: &BoardConfig) -> Router {
    router
        .layer(DefaultBodyLimit::max(body_limit(config)))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, Bytes},
        extract::rejection::BytesRejection,
        http::{Request, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;

    #[test]
    fn test_body_limit_covers_longest_message() {
        let mut config = BoardConfig::default();
        assert_eq!(body_limit(&config), config.security.max_body_size);

        config.board.max_message_length = 20_000;
        assert_eq!(body_limit(&config), 20_000 * 12 + 1024);
    }

    #[tokio::test]
    async fn test_oversized_body_reaches_handler_as_rejection() {
        let mut config = BoardConfig::default();
        config.security.max_body_size = 1024;
        config.board.max_message_length = 1;

        let app = with_request_limits(
            Router::new().route(
                "/",
                post(|body: Result<Bytes, BytesRejection>| async move {
                    match body {
                        Ok(bytes) => bytes.len().to_string(),
                        Err(_) => "rejected".to_string(),
                    }
                }),
            ),
            &config,
        );

        let small = app
            .clone()
            .oneshot(Request::post("/").body(Body::from(vec![b'a'; 512])).unwrap())
            .await
            .unwrap();
        assert_eq!(small.status(), StatusCode::OK);

        let large = app
            .oneshot(Request::post("/").body(Body::from(vec![b'a'; 4096])).unwrap())
            .await
            .unwrap();
        assert_eq!(large.status(), StatusCode::OK);
        let body = axum::body::to_bytes(large.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"rejected");
    }
}
