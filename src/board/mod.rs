//! The board: one request cycle over a post store.
//!
//! # Data Flow
//! ```text
//! POST: Submission + SessionData + now
//!     → CSRF check (constant-time)
//!     → rate limit (last accepted post only)
//!     → content bounds (trim, non-empty, max characters)
//!     → PostStore::append → session.last_post_time = now
//!
//! GET:
//!     → PostStore::read_all → render_page
//! ```
//!
//! # Design Decisions
//! - `submit` is a function of (submission, session, store, clock)
//! - Every outcome ends in the same redirect; rejections are only logged
//! - A failed append does not count against the rate limit

pub mod render;
pub mod validation;

use std::sync::Arc;

use crate::config::BoardSettings;
use crate::observability::metrics;
use crate::security::{tokens_match, PostRateLimit};
use crate::session::SessionData;
use crate::store::{Post, PostStore};

pub use render::{escape_html, render_page};
pub use validation::{normalize_text, Rejection, Submission};

/// Result of one POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { stored: usize },
    Rejected(Rejection),
    StoreFailed,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            SubmitOutcome::Accepted { .. } => "accepted",
            SubmitOutcome::Rejected(rejection) => rejection.label(),
            SubmitOutcome::StoreFailed => "store_failed",
        }
    }
}

/// Board settings bound to a post store.
#[derive(Clone)]
pub struct Board {
    settings: BoardSettings,
    rate_limit: PostRateLimit,
    store: Arc<dyn PostStore>,
}

impl Board {
    pub fn new(settings: BoardSettings, store: Arc<dyn PostStore>) -> Self {
        Self {
            rate_limit: PostRateLimit::new(settings.rate_limit_secs),
            settings,
            store,
        }
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Validate a submission and store it. Blocks on store I/O.
    pub fn submit(&self, session: &mut SessionData, form: Submission, now: u64) -> SubmitOutcome {
        let outcome = match self.validate(session, &form, now) {
            Err(rejection) => {
                match &rejection {
                    Rejection::CsrfMismatch => tracing::warn!("CSRF token mismatch"),
                    Rejection::RateLimited { retry_after } => {
                        tracing::debug!(retry_after, "Post dropped by rate limit")
                    }
                    Rejection::Empty => tracing::debug!("Empty post dropped"),
                    Rejection::TooLong { chars, max } => {
                        tracing::debug!(chars, max, "Oversized post dropped")
                    }
                }
                SubmitOutcome::Rejected(rejection)
            }
            Ok(text) => match self.store.append(Post::new(text)) {
                Ok(stored) => {
                    session.last_post_time = Some(now);
                    metrics::record_stored_posts(stored);
                    tracing::debug!(stored, "Post accepted");
                    SubmitOutcome::Accepted { stored }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to store post");
                    SubmitOutcome::StoreFailed
                }
            },
        };

        metrics::record_submission(outcome.label());
        outcome
    }

    fn validate(
        &self,
        session: &SessionData,
        form: &Submission,
        now: u64,
    ) -> Result<String, Rejection> {
        if !tokens_match(&session.csrf_token, &form.csrf_token) {
            return Err(Rejection::CsrfMismatch);
        }

        self.rate_limit
            .check(session.last_post_time, now)
            .map_err(|retry_after| Rejection::RateLimited { retry_after })?;

        normalize_text(&form.text, self.settings.max_message_length)
    }

    /// Current posts, newest first. Blocks on store I/O.
    pub fn posts(&self) -> Vec<Post> {
        self.store.read_all()
    }

    /// Render the page for a session holding `csrf_token`.
    pub fn render(&self, csrf_token: &str) -> String {
        render_page(&self.settings, csrf_token, &self.posts())
    }
}
