//! File-backed key/value store with atomic writes.
//!
//! Each key is one file in the store directory. Writes go through a temporary
//! file, are fsynced, then renamed over the target while holding an exclusive
//! lock on a sibling `.lock` file.

use finboard_core::storage::KeyValueStore;
use finboard_core::{FinboardError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write as IoWrite};
use std::path::{Path, PathBuf};

/// Durable store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    ///
    /// Keys are restricted to ASCII alphanumerics, `_` and `-` so they can
    /// never escape the store directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FinboardError::storage(format!("Invalid storage key: '{key}'")));
        }
        Ok(self.dir.join(key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        self.ensure_dir()?;
        let _lock = FileLock::acquire(&path)?;

        let tmp_path = self.dir.join(format!(".{key}.tmp"));
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(value.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path)?;
        tracing::trace!("[FileKeyValueStore] Wrote {} bytes to '{}'", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = FileLock::acquire(&path)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Exclusive lock on a sibling `.lock` file, released on drop.
///
/// The lock file is never deleted: unlinking it while held would let another
/// process lock a fresh inode at the same path.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| FinboardError::storage(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("store"));

        store.set("token", "jwt-abc").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("jwt-abc"));

        store.set("token", "jwt-def").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("jwt-def"));
    }

    #[test]
    fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());
        assert!(store.get("financialData").unwrap().is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.remove("token").unwrap();
        store.set("token", "jwt").unwrap();
        store.remove("token").unwrap();
        store.remove("token").unwrap();
        assert!(store.get("token").unwrap().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());
        store.set("financialData", "[]").unwrap();

        assert!(!temp_dir.path().join(".financialData.tmp").exists());
        assert!(temp_dir.path().join("financialData").exists());
    }

    #[test]
    fn test_lock_file_is_kept_and_excludes_other_handles() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());
        store.set("token", "jwt").unwrap();

        let lock_path = temp_dir.path().join("token.lock");
        assert!(lock_path.exists());

        let guard = FileLock::acquire(&temp_dir.path().join("token")).unwrap();
        let other = File::open(&lock_path).unwrap();
        assert!(other.try_lock_exclusive().is_err());

        drop(guard);
        assert!(lock_path.exists());
        other.try_lock_exclusive().unwrap();
        other.unlock().unwrap();

        store.set("token", "jwt-2").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("jwt-2"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());
        let err = store.set("../escape", "x").unwrap_err();
        assert!(matches!(err, FinboardError::Storage(_)));
    }

    #[test]
    fn test_values_survive_new_handle() {
        let temp_dir = TempDir::new().unwrap();
        FileKeyValueStore::new(temp_dir.path())
            .set("token", "persisted")
            .unwrap();

        let reopened = FileKeyValueStore::new(temp_dir.path());
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("persisted"));
    }
}
