//! Session subsystem.
//!
//! A session is created on first contact and identified by an opaque
//! random cookie. It carries the CSRF token and the last accepted post time.

pub mod cookie;
pub mod store;

use std::time::{SystemTime, UNIX_EPOCH};

pub use store::{run_sweeper, ResolvedSession, SessionData, SessionHandle, SessionStore};

/// Current wall-clock time in unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
