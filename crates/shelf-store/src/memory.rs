//! In-memory object store for testing and development

use crate::{ListOptions, Listing, ObjectMetadata, ObjectStore, PutOptions, Result, StorageKey};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;

/// An in-memory object store
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<DashMap<String, (Bytes, ObjectMetadata)>>,
}

impl MemoryObjectStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
        }
    }

    /// Get the number of objects stored
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Get an object's content and metadata
    pub fn get(&self, key: &str) -> Option<(Bytes, ObjectMetadata)> {
        self.objects.get(key).map(|entry| entry.value().clone())
    }

    /// Get total size of all objects
    pub fn total_size(&self) -> u64 {
        self.objects.iter().map(|entry| entry.value().1.size).sum()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &StorageKey,
        content: Bytes,
        options: PutOptions,
    ) -> Result<Option<ObjectMetadata>> {
        let metadata = ObjectMetadata::new(key, &content).with_options(options);
        self.objects
            .insert(key.as_str().to_string(), (content, metadata.clone()));
        tracing::debug!(key = %key, size = metadata.size, "Stored object in memory");
        Ok(Some(metadata))
    }

    async fn list(&self, options: ListOptions) -> Result<Listing> {
        let mut entries: Vec<ObjectMetadata> = self
            .objects
            .iter()
            .map(|entry| entry.value().1.clone())
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(Listing::from_sorted(entries, &options))
    }
}
