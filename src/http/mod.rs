//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request span)
//!     → GET /  → session → Board::render
//!     → POST / → session → Board::submit
//!     → response.rs (page or 303 redirect, Set-Cookie)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeUuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
