//! Submission validation.

use serde::Deserialize;

/// Form fields of a POST. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub text: String,
    pub csrf_token: String,
}

impl Submission {
    pub fn new(text: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            csrf_token: csrf_token.into(),
        }
    }
}

/// Why a submission was dropped. Never shown to the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    CsrfMismatch,
    RateLimited { retry_after: u64 },
    Empty,
    TooLong { chars: usize, max: usize },
}

impl Rejection {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::CsrfMismatch => "csrf_mismatch",
            Rejection::RateLimited { .. } => "rate_limited",
            Rejection::Empty => "empty",
            Rejection::TooLong { .. } => "too_long",
        }
    }
}

/// Characters stripped from both ends of a message.
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Trim `raw` and check it is non-empty and at most `max_chars` characters.
pub fn normalize_text(raw: &str, max_chars: usize) -> Result<String, Rejection> {
    let text = raw.trim_matches(TRIMMED);
    if text.is_empty() {
        return Err(Rejection::Empty);
    }

    let chars = text.chars().count();
    if chars > max_chars {
        return Err(Rejection::TooLong {
            chars,
            max: max_chars,
        });
    }

    Ok(text.to_string())
}
