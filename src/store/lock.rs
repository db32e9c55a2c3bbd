//! Advisory file locking.
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFileEx on
//! Windows). The lock is held for as long as the [`LockedFile`] lives and is
//! released on drop.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use fs2::FileExt;

/// An open file holding an advisory lock.
pub struct LockedFile {
    file: File,
}

impl LockedFile {
    /// Block until an exclusive lock is held on `file`.
    pub fn exclusive(file: File) -> io::Result<Self> {
        FileExt::lock_exclusive(&file)?;
        Ok(Self { file })
    }

    /// Block until a shared lock is held on `file`.
    pub fn shared(file: File) -> io::Result<Self> {
        FileExt::lock_shared(&file)?;
        Ok(Self { file })
    }

    /// Non-blocking exclusive lock attempt.
    pub fn try_exclusive(file: File) -> io::Result<Self> {
        FileExt::try_lock_exclusive(&file)?;
        Ok(Self { file })
    }

    /// Read the whole file from the start.
    pub fn read_all(&mut self) -> io::Result<String> {
        self.file.seek(SeekFrom::Start(0))?;
        let mut raw = String::new();
        self.file.read_to_string(&mut raw)?;
        Ok(raw)
    }

    /// Truncate the file and write `contents` in its place.
    pub fn replace_contents(&mut self, contents: &[u8]) -> io::Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(contents)?;
        self.file.flush()?;
        self.file.sync_data()
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
