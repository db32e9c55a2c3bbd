//! Security response headers.
//!
//! Every response is sent with framing denied, MIME sniffing disabled, a
//! strict referrer policy, and a content security policy that forbids all
//! scripts. Posts are rendered as escaped text inside a script-free page.

use axum::{
    http::{header, HeaderName, HeaderValue},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub const FRAME_OPTIONS: &str = "DENY";
pub const CONTENT_TYPE_OPTIONS: &str = "nosniff";
pub const REFERRER_POLICY: &str = "strict-origin-when-cross-origin";
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'none'; \
     style-src 'self' 'unsafe-inline'; form-action 'self'; frame-ancestors 'none'";

/// The headers added to every response.
pub fn security_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (header::X_FRAME_OPTIONS, HeaderValue::from_static(FRAME_OPTIONS)),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static(CONTENT_TYPE_OPTIONS),
        ),
        (header::REFERRER_POLICY, HeaderValue::from_static(REFERRER_POLICY)),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ),
    ]
}

/// Wrap `router` so all its responses carry the security headers.
pub fn with_security_headers(router: Router) -> Router {
    security_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
}
