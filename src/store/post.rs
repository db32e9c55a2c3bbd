//! Post type and the bounded newest-first log.

use serde::{Deserialize, Serialize};

/// A single board message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub text: String,
}

impl Post {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Ordered posts, newest at index 0, never longer than `capacity`.
#[derive(Debug, Clone)]
pub struct PostLog {
    posts: Vec<Post>,
    capacity: usize,
}

impl PostLog {
    /// An empty log. A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            posts: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Wrap existing posts, dropping the oldest beyond `capacity`.
    pub fn from_posts(mut posts: Vec<Post>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        posts.truncate(capacity);
        Self { posts, capacity }
    }

    /// Prepend `post`, evicting the oldest entry when full.
    pub fn push(&mut self, post: Post) {
        self.posts.insert(0, post);
        self.posts.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.posts.clear();
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[Post] {
        &self.posts
    }
}
