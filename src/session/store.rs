//! In-process session storage keyed by cookie.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use dashmap::DashMap;
use tokio::sync::{broadcast, Mutex};

use crate::config::SessionConfig;
use crate::observability::metrics;
use crate::security::generate_token;
use crate::session::cookie::{find_cookie, format_set_cookie};

/// Per-client state gating calls into the post store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// Created once per session, embedded in every form.
    pub csrf_token: String,
    /// Unix seconds of the last accepted post.
    pub last_post_time: Option<u64>,
}

impl SessionData {
    pub fn new() -> Self {
        Self {
            csrf_token: generate_token(),
            last_post_time: None,
        }
    }
}

impl Default for SessionData {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to one session. Holding the lock serializes that session's
/// requests.
pub type SessionHandle = Arc<Mutex<SessionData>>;

struct SessionEntry {
    data: SessionHandle,
    last_seen: AtomicU64,
}

impl SessionEntry {
    fn is_expired(&self, now: u64, ttl_secs: u64) -> bool {
        now.saturating_sub(self.last_seen.load(Ordering::Relaxed)) >= ttl_secs
    }
}

/// The session for the current request.
pub struct ResolvedSession {
    pub id: String,
    pub handle: SessionHandle,
    /// `Set-Cookie` value when the session was created by this request.
    pub set_cookie: Option<String>,
}

/// Sessions expire after `ttl_secs` without a request.
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
        }
    }

    /// Look up the session named by the request cookie, or start a new one.
    ///
    /// Unknown or expired ids are never adopted; the client gets a fresh id.
    pub fn resolve(&self, headers: &HeaderMap, now: u64) -> ResolvedSession {
        if let Some(id) = find_cookie(headers, &self.config.cookie_name) {
            if let Some(handle) = self.touch(id, now) {
                return ResolvedSession {
                    id: id.to_string(),
                    handle,
                    set_cookie: None,
                };
            }
        }
        self.create(now)
    }

    fn touch(&self, id: &str, now: u64) -> Option<SessionHandle> {
        {
            let entry = self.sessions.get(id)?;
            if !entry.is_expired(now, self.config.ttl_secs) {
                entry.last_seen.store(now, Ordering::Relaxed);
                return Some(entry.data.clone());
            }
        }

        // The read guard must be gone before removing from the same shard.
        self.sessions.remove(id);
        tracing::debug!("Session expired, issuing a new one");
        None
    }

    fn create(&self, now: u64) -> ResolvedSession {
        let id = generate_token();
        let handle = Arc::new(Mutex::new(SessionData::new()));
        self.sessions.insert(
            id.clone(),
            SessionEntry {
                data: handle.clone(),
                last_seen: AtomicU64::new(now),
            },
        );
        metrics::record_active_sessions(self.sessions.len());

        let set_cookie = format_set_cookie(
            &self.config.cookie_name,
            &id,
            self.config.ttl_secs,
            self.config.secure_cookie,
        );
        ResolvedSession {
            id,
            handle,
            set_cookie: Some(set_cookie),
        }
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn sweep(&self, now: u64) -> usize {
        let before = self.sessions.len();
        let ttl = self.config.ttl_secs;
        self.sessions.retain(|_, entry| !entry.is_expired(now, ttl));
        let after = self.sessions.len();
        metrics::record_active_sessions(after);
        before.saturating_sub(after)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// Periodically sweep expired sessions until shutdown.
pub async fn run_sweeper(store: Arc<SessionStore>, mut shutdown: broadcast::Receiver<()>) {
    let period = Duration::from_secs(store.config().sweep_interval_secs.max(1));
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = store.sweep(super::unix_now());
                if removed > 0 {
                    tracing::debug!(removed, remaining = store.len(), "Swept expired sessions");
                }
            }
            _ = shutdown.recv() => {
                tracing::debug!("Session sweeper stopping");
                break;
            }
        }
    }
}
