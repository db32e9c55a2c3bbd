//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the board.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the board server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BoardConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Board behaviour: title, retention and anti-abuse bounds.
    pub board: BoardSettings,

    /// Where posts are persisted.
    pub storage: StorageConfig,

    /// Session cookie and lifetime settings.
    pub session: SessionConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Security hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Board settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Title shown in the page heading and `<title>`.
    pub title: String,

    /// How many posts are retained (newest first).
    pub max_posts: usize,

    /// Maximum message length, counted in characters.
    pub max_message_length: usize,

    /// Minimum seconds between two accepted posts from one session.
    pub rate_limit_secs: u64,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            title: "Text Board".to_string(),
            max_posts: 30,
            max_message_length: 2000,
            rate_limit_secs: 10,
        }
    }
}

/// Post storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON file holding the posts.
    pub posts_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            posts_path: "data/posts.json".to_string(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the session cookie.
    pub cookie_name: String,

    /// Idle lifetime of a session in seconds.
    pub ttl_secs: u64,

    /// How often expired sessions are swept, in seconds.
    pub sweep_interval_secs: u64,

    /// Add the `Secure` attribute to the session cookie.
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "board_session".to_string(),
            ttl_secs: 24 * 60 * 60,
            sweep_interval_secs: 300,
            secure_cookie: false,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 64 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Operational log file (warnings, errors, heartbeats).
    pub log_path: String,

    /// Truncate the operational log on startup.
    pub clear_log_on_start: bool,

    /// Write a "Page loaded" line to the operational log on every render.
    pub heartbeat: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_path: "data/error.txt".to_string(),
            clear_log_on_start: false,
            heartbeat: true,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
