//! Post storage subsystem.
//!
//! # Data Flow
//! ```text
//! POST accepted by board
//!     → PostStore::append (exclusive lock: read → prepend → trim → write)
//!
//! GET render
//!     → PostStore::read_all (shared lock: read → parse, empty on any failure)
//! ```
//!
//! # Design Decisions
//! - The file is the only source of truth; nothing is cached between requests
//! - Bounded FIFO: newest first, oldest dropped past `max_posts`
//! - Readers never fail; missing or malformed data reads as "no posts"

pub mod file;
pub mod lock;
pub mod memory;
pub mod post;

use std::path::PathBuf;

pub use file::FilePostStore;
pub use memory::MemoryPostStore;
pub use post::{Post, PostLog};

/// Errors from the write path of a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open posts file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to lock posts file {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("posts file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode posts: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A bounded, newest-first collection of posts.
///
/// `append` must be atomic with respect to every other caller of the same
/// store, including callers in other processes for file-backed stores.
pub trait PostStore: Send + Sync {
    /// Prepend a post, evicting the oldest beyond capacity.
    /// Returns the number of stored posts afterwards.
    fn append(&self, post: Post) -> Result<usize, StoreError>;

    /// Current posts, newest first. Never fails.
    fn read_all(&self) -> Vec<Post>;

    /// Remove every post.
    fn clear(&self) -> Result<(), StoreError>;
}
