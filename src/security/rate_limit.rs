//! Per-session posting rate limit.
//!
//! A window of size one: only the time of the last accepted post matters.
//! There is no counter and no bucket to refill.

/// Minimum spacing between accepted posts from one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostRateLimit {
    window_secs: u64,
}

impl PostRateLimit {
    pub fn new(window_secs: u64) -> Self {
        Self { window_secs }
    }

    /// `Ok` if a post at `now` is allowed after one accepted at `last_post`,
    /// otherwise the seconds left until it would be.
    pub fn check(&self, last_post: Option<u64>, now: u64) -> Result<(), u64> {
        let Some(last) = last_post else {
            return Ok(());
        };

        let elapsed = now.saturating_sub(last);
        if elapsed >= self.window_secs {
            Ok(())
        } else {
            Err(self.window_secs - elapsed)
        }
    }
}
