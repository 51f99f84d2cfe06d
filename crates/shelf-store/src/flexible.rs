//! Backend selection at startup

use crate::{
    ListOptions, Listing, LocalObjectStore, MemoryObjectStore, ObjectMetadata, ObjectStore,
    PutOptions, Result, StorageKey,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

/// Object store that is either on disk or in memory
#[derive(Clone)]
pub enum FlexibleObjectStore {
    /// Local directory
    Local(LocalObjectStore),
    /// In-memory storage (development)
    Memory(MemoryObjectStore),
}

impl FlexibleObjectStore {
    /// Open a local store rooted at `root`
    pub async fn local(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::Local(LocalObjectStore::open(root).await?))
    }

    /// Check if objects survive a restart
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

#[async_trait]
impl ObjectStore for FlexibleObjectStore {
    async fn put(
        &self,
        key: &StorageKey,
        content: Bytes,
        options: PutOptions,
    ) -> Result<Option<ObjectMetadata>> {
        match self {
            Self::Local(store) => store.put(key, content, options).await,
            Self::Memory(store) => store.put(key, content, options).await,
        }
    }

    async fn list(&self, options: ListOptions) -> Result<Listing> {
        match self {
            Self::Local(store) => store.list(options).await,
            Self::Memory(store) => store.list(options).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_is_persistent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlexibleObjectStore::local(dir.path()).await.unwrap();
        assert!(store.is_persistent());

        let key = StorageKey::derive("docs", "a.txt").unwrap();
        store
            .put(&key, Bytes::from_static(b"a"), PutOptions::default())
            .await
            .unwrap();
        let listing = store
            .list(ListOptions::default().with_prefix("docs/"))
            .await
            .unwrap();
        assert_eq!(listing.objects[0].key, "docs/a.txt");
    }

    #[tokio::test]
    async fn test_local_fails_on_unusable_directory() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the store directory should go
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"not a directory").unwrap();

        assert!(FlexibleObjectStore::local(&blocker).await.is_err());
    }

    #[tokio::test]
    async fn test_memory_is_not_persistent() {
        let store = FlexibleObjectStore::Memory(MemoryObjectStore::new());
        assert!(!store.is_persistent());
    }
}
