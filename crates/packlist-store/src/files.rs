//! File-byte storage for uploads.
//!
//! Upload *records* live in the checklist model; the bytes live behind
//! [`FileStore`], keyed by `{item_uuid}_{filename}`. Deleting an entity
//! cascades here: the service removes the bytes for every upload under the
//! deleted subtree.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use packlist_core::ItemId;

use crate::error::{StoreError, StoreResult};

/// Maximum upload size in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10_485_760;

/// Accepted file extensions.
pub const SUGGESTED_EXTENSIONS: [&str; 3] = [".txt", ".pdf", ".xlsx"];

/// Storage key for an upload's bytes.
#[must_use]
pub fn upload_key(item_id: ItemId, filename: &str) -> String {
    format!("{}_{}", item_id.0, filename)
}

/// Raw file-byte storage.
///
/// `remove` is idempotent: removing a missing key succeeds, so cascade
/// cleanup never fails a delete that already lost its bytes.
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// Store a file's bytes under a key, replacing any existing content.
    async fn save(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Remove a file's bytes. Missing keys are not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Whether bytes exist for a key.
    async fn exists(&self, key: &str) -> bool;
}

/// In-memory file store for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStore {
    /// Create an empty file store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an Arc for sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<u8>>> {
        self.files.read().unwrap_or_else(|poisoned| {
            tracing::warn!("file store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<u8>>> {
        self.files.write().unwrap_or_else(|poisoned| {
            tracing::warn!("file store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait::async_trait]
impl FileStore for InMemoryFileStore {
    async fn save(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        self.write().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.write().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }
}

/// File store writing upload bytes under a root directory.
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    /// Create a store rooted at `root`. The directory is created on first save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait::async_trait]
impl FileStore for DiskFileStore {
    async fn save(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        tokio::fs::write(self.path_for(key), bytes)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Storage(e.to_string())),
        }
    }

    async fn exists(&self, key: &str) -> bool {
        tokio::fs::try_exists(self.path_for(key)).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_key_shape() {
        let item_id = ItemId::new();
        let key = upload_key(item_id, "passport.pdf");
        assert_eq!(key, format!("{}_passport.pdf", item_id.0));
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let store = InMemoryFileStore::new();
        store.save("k", b"bytes").await.unwrap();
        assert!(store.exists("k").await);

        store.remove("k").await.unwrap();
        assert!(!store.exists("k").await);

        // Idempotent remove
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_disk_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskFileStore::new(dir.path());

        store.save("a.txt", b"hello").await.unwrap();
        assert!(store.exists("a.txt").await);
        assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"hello");

        store.remove("a.txt").await.unwrap();
        assert!(!store.exists("a.txt").await);
        store.remove("a.txt").await.unwrap();
    }
}
