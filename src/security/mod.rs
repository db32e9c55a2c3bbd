//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (body size, request timeout)
//!     → handler: csrf.rs (token check), rate_limit.rs (per-session window)
//! Outgoing response:
//!     → headers.rs (frame/sniff/referrer/CSP headers)
//! ```
//!
//! # Design Decisions
//! - Rejected submissions look identical to accepted ones (redirect)
//! - Token comparison is constant-time
//! - No trust in client input: all text is escaped on output

pub mod csrf;
pub mod headers;
pub mod limits;
pub mod rate_limit;

pub use csrf::{generate_token, tokens_match};
pub use rate_limit::PostRateLimit;
