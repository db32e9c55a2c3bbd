//! Anonymous text board library.
//!
//! A bounded, newest-first post log in a single locked JSON file, served
//! over HTTP with CSRF, per-session rate limiting and input bounds.

pub mod board;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod session;
pub mod store;

pub use board::Board;
pub use config::schema::BoardConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{FilePostStore, Post, PostStore};
