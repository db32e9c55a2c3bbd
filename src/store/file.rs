//! JSON file backed post store.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::store::lock::LockedFile;
use crate::store::{Post, PostLog, PostStore, StoreError};

/// Posts persisted as a pretty-printed JSON array in a single file.
///
/// Writers hold an exclusive advisory lock across the whole
/// read-modify-write, so concurrent appends from threads or processes never
/// lose each other's posts.
#[derive(Debug, Clone)]
pub struct FilePostStore {
    path: PathBuf,
    max_posts: usize,
}

impl FilePostStore {
    pub fn new(path: impl Into<PathBuf>, max_posts: usize) -> Self {
        Self {
            path: path.into(),
            max_posts,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_posts(&self) -> usize {
        self.max_posts
    }

    /// Create the parent directory and seed an empty array if the file is
    /// missing, then check that the file can be locked.
    pub fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Open {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                file.write_all(b"[]")?;
                file.sync_data()?;
                tracing::info!(path = %self.path.display(), "Created empty posts file");
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(source) => {
                return Err(StoreError::Open {
                    path: self.path.clone(),
                    source,
                })
            }
        }

        let file = self.open_rw()?;
        LockedFile::exclusive(file).map_err(|source| StoreError::Lock {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    fn open_rw(&self) -> Result<File, StoreError> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })
    }

    fn lock_for_write(&self) -> Result<LockedFile, StoreError> {
        let file = self.open_rw()?;
        LockedFile::exclusive(file).map_err(|source| StoreError::Lock {
            path: self.path.clone(),
            source,
        })
    }

    fn write_log(&self, locked: &mut LockedFile, log: &PostLog) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(log.as_slice())?;
        locked.replace_contents(body.as_bytes())?;
        Ok(())
    }

    fn try_read(&self) -> io::Result<String> {
        let file = File::open(&self.path)?;
        let mut locked = LockedFile::shared(file)?;
        locked.read_all()
    }
}

/// Parse stored posts; anything that is not a JSON array of posts is `None`.
fn parse_posts(raw: &str) -> Option<Vec<Post>> {
    if raw.trim().is_empty() {
        return Some(Vec::new());
    }
    serde_json::from_str(raw).ok()
}

impl PostStore for FilePostStore {
    fn append(&self, post: Post) -> Result<usize, StoreError> {
        let mut locked = self.lock_for_write()?;

        let raw = locked.read_all()?;
        let existing = parse_posts(&raw).unwrap_or_else(|| {
            tracing::warn!(
                path = %self.path.display(),
                bytes = raw.len(),
                "Posts file is malformed, starting from an empty board"
            );
            Vec::new()
        });

        let mut log = PostLog::from_posts(existing, self.max_posts);
        log.push(post);
        self.write_log(&mut locked, &log)?;

        Ok(log.len())
    }

    fn read_all(&self) -> Vec<Post> {
        let raw = match self.try_read() {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read posts file");
                return Vec::new();
            }
        };

        parse_posts(&raw).unwrap_or_else(|| {
            tracing::debug!(path = %self.path.display(), "Posts file is malformed, rendering empty board");
            Vec::new()
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut locked = self.lock_for_write()?;
        self.write_log(&mut locked, &PostLog::new(self.max_posts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn texts(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.text.as_str()).collect()
    }

    fn store_in(dir: &tempfile::TempDir, max_posts: usize) -> FilePostStore {
        FilePostStore::new(dir.path().join("posts.json"), max_posts)
    }

    #[test]
    fn test_append_evicts_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, 2);

        store.append(Post::new("a")).unwrap();
        store.append(Post::new("b")).unwrap();
        let len = store.append(Post::new("c")).unwrap();

        assert_eq!(len, 2);
        assert_eq!(texts(&store.read_all()), vec!["c", "b"]);
    }

    #[test]
    fn test_bounded_after_every_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, 4);
        for i in 0..12 {
            let len = store.append(Post::new(format!("post {}", i))).unwrap();
            assert!(len <= 4);
            assert!(store.read_all().len() <= 4);
        }
        assert_eq!(store.read_all()[0].text, "post 11");
    }

    #[test]
    fn test_file_is_pretty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, 5);
        store.append(Post::new("hello")).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!([{ "text": "hello" }]));
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, 5);
        assert!(store.read_all().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_read_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, 5);
        fs::write(store.path(), "").unwrap();
        assert!(store.read_all().is_empty());
    }

    #[test]
    fn test_read_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, 5);

        for body in ["{not json", "[{\"text\": 1}]", "{\"text\": \"x\"}", "[{\"te"] {
            fs::write(store.path(), body).unwrap();
            assert!(store.read_all().is_empty(), "body {:?}", body);
        }
    }

    #[test]
    fn test_append_over_malformed_file_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, 5);
        fs::write(store.path(), "garbage").unwrap();

        store.append(Post::new("fresh")).unwrap();
        assert_eq!(texts(&store.read_all()), vec!["fresh"]);
    }

    #[test]
    fn test_append_trims_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let wide = store_in(&dir, 10);
        for i in 0..6 {
            wide.append(Post::new(i.to_string())).unwrap();
        }

        let narrow = store_in(&dir, 3);
        narrow.append(Post::new("new")).unwrap();
        assert_eq!(texts(&narrow.read_all()), vec!["new", "5", "4"]);
    }

    #[test]
    fn test_initialize_seeds_empty_array_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePostStore::new(dir.path().join("nested/dir/posts.json"), 5);

        store.initialize().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");

        store.append(Post::new("keep me")).unwrap();
        store.initialize().unwrap();
        assert_eq!(texts(&store.read_all()), vec!["keep me"]);
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, 5);
        store.append(Post::new("a")).unwrap();
        store.clear().unwrap();
        assert!(store.read_all().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn test_open_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePostStore::new(dir.path().join("missing-dir/posts.json"), 5);
        let err = store.append(Post::new("lost")).unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir, 64));
        store.initialize().unwrap();

        let handles: Vec<_> = (0..16)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..4 {
                        store.append(Post::new(format!("{}-{}", t, i))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let posts = store.read_all();
        assert_eq!(posts.len(), 64);
        for t in 0..16 {
            for i in 0..4 {
                let text = format!("{}-{}", t, i);
                assert!(posts.iter().any(|p| p.text == text), "missing {}", text);
            }
        }
    }

    #[test]
    fn test_separate_store_handles_share_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let path = path.clone();
                thread::spawn(move || {
                    FilePostStore::new(path, 8)
                        .append(Post::new(t.to_string()))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(FilePostStore::new(path, 8).read_all().len(), 8);
    }
}
