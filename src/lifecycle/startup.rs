//! Startup orchestration.
//!
//! # Responsibilities
//! - Check environment preconditions (storage directory, post file, locking)
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any precondition failure is fatal and logged
//! - Listeners bind last (traffic only when storage is ready)

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::BoardConfig;
use crate::store::{FilePostStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("post storage is not usable: {0}")]
    Storage(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Prepare the post file and return the store serving it.
pub fn preflight(config: &BoardConfig) -> Result<Arc<FilePostStore>, StartupError> {
    let store = FilePostStore::new(&config.storage.posts_path, config.board.max_posts);
    store.initialize()?;

    tracing::info!(
        path = %store.path().display(),
        max_posts = store.max_posts(),
        "Post storage ready"
    );
    Ok(Arc::new(store))
}

/// Bind the configured listener address.
pub async fn bind_listener(config: &BoardConfig) -> Result<TcpListener, StartupError> {
    TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })
}
