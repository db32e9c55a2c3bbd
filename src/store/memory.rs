//! In-process post store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::store::{Post, PostLog, PostStore, StoreError};

/// A mutex-guarded [`PostLog`]. Nothing is persisted.
#[derive(Debug)]
pub struct MemoryPostStore {
    log: Mutex<PostLog>,
}

impl MemoryPostStore {
    pub fn new(max_posts: usize) -> Self {
        Self {
            log: Mutex::new(PostLog::new(max_posts)),
        }
    }

    fn log(&self) -> MutexGuard<'_, PostLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PostStore for MemoryPostStore {
    fn append(&self, post: Post) -> Result<usize, StoreError> {
        let mut log = self.log();
        log.push(post);
        Ok(log.len())
    }

    fn read_all(&self) -> Vec<Post> {
        self.log().as_slice().to_vec()
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.log().clear();
        Ok(())
    }
}
