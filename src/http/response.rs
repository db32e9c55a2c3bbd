//! Response helpers.

use axum::{
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
};

/// Where every POST ends up, whatever happened to the submission.
pub const BOARD_PATH: &str = "/";

/// 303 See Other back to the board.
pub fn redirect_to_board() -> Response {
    Redirect::to(BOARD_PATH).into_response()
}

/// The rendered page. It embeds the session's CSRF token, so it is not cached.
pub fn board_page(html: String) -> Response {
    let mut response = Html(html).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    response
}

/// Attach a `Set-Cookie` header when a session was just created.
pub fn with_session_cookie(mut response: Response, set_cookie: Option<String>) -> Response {
    if let Some(cookie) = set_cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Session cookie is not a valid header value"),
        }
    }
    response
}
