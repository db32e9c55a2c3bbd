//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and formats.
//! Every problem is reported, not just the first one.

use std::net::SocketAddr;

use crate::config::schema::BoardConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

const MIN_BODY_SIZE: usize = 1024;

/// Validate a parsed configuration.
pub fn validate_config(config: &BoardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.board.max_posts == 0 {
        errors.push(ValidationError::new("board.max_posts", "must be at least 1"));
    }
    if config.board.max_message_length == 0 {
        errors.push(ValidationError::new(
            "board.max_message_length",
            "must be at least 1",
        ));
    }

    if config.storage.posts_path.trim().is_empty() {
        errors.push(ValidationError::new("storage.posts_path", "must not be empty"));
    }

    if !is_cookie_token(&config.session.cookie_name) {
        errors.push(ValidationError::new(
            "session.cookie_name",
            format!("'{}' is not a valid cookie name", config.session.cookie_name),
        ));
    }
    if config.session.ttl_secs == 0 {
        errors.push(ValidationError::new("session.ttl_secs", "must be at least 1"));
    }
    if config.session.sweep_interval_secs == 0 {
        errors.push(ValidationError::new(
            "session.sweep_interval_secs",
            "must be at least 1",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be at least 1"));
    }

    if config.security.max_body_size < MIN_BODY_SIZE {
        errors.push(ValidationError::new(
            "security.max_body_size",
            format!("must be at least {} bytes", MIN_BODY_SIZE),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 6265 token: visible ASCII minus separators.
fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\' | b'"'
                        | b'/' | b'[' | b']' | b'?' | b'=' | b'{' | b'}'
                )
        })
}
