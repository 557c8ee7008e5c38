//! File-based storage implementation for native platforms.

use super::{KeyValueStore, StoreError, StoreResult};
use crate::api::BoxFuture;
use std::fs;
use std::path::PathBuf;

/// File-backed store: one file per key in a base directory.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at the given directory, creating it if
    /// needed.
    pub fn new(base_path: PathBuf) -> StoreResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(|e| StoreError::Io(format!("Failed to create storage directory: {}", e)))?;
        }
        Ok(Self { base_path })
    }

    /// Create a file store in the default location
    /// (`<data dir>/larkcanvas/cache/`).
    pub fn default_location() -> StoreResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Io("Could not determine home directory".to_string()))?;

        let path = base.join("larkcanvas").join("cache");
        Self::new(path)
    }

    /// File path for a key, sanitized for the filesystem.
    fn key_path(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// Base directory of this store.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BoxFuture<'_, StoreResult<Option<String>>> {
        let path = self.key_path(key);
        Box::pin(async move {
            if !path.exists() {
                return Ok(None);
            }
            fs::read_to_string(&path)
                .map(Some)
                .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))
        })
    }

    fn set(&self, key: &str, value: &str) -> BoxFuture<'_, StoreResult<()>> {
        let path = self.key_path(key);
        let value = value.to_string();
        Box::pin(async move {
            fs::write(&path, value)
                .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", path.display(), e)))
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, StoreResult<()>> {
        let path = self.key_path(key);
        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StoreError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn contains(&self, key: &str) -> BoxFuture<'_, StoreResult<bool>> {
        let path = self.key_path(key);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_set_get() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        block_on(store.set("stage", r#"{"children":[]}"#)).unwrap();
        let value = block_on(store.get("stage")).unwrap();

        assert_eq!(value.as_deref(), Some(r#"{"children":[]}"#));
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(block_on(store.get("nonexistent")).unwrap(), None);
    }

    #[test]
    fn test_file_store_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        block_on(store.set("stage", "{}")).unwrap();
        assert!(block_on(store.contains("stage")).unwrap());

        block_on(store.remove("stage")).unwrap();
        assert!(!block_on(store.contains("stage")).unwrap());
    }

    #[test]
    fn test_file_store_sanitizes_key() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        block_on(store.set("weird/key:with*chars", "value")).unwrap();
        let value = block_on(store.get("weird/key:with*chars")).unwrap();
        assert_eq!(value.as_deref(), Some("value"));
    }
}
