//! Local-disk object store
//!
//! Objects live in a single flat directory, named by the MD5 of the key.
//! `<id>.json` holds the metadata, including the original key and version;
//! `<id>.<version>.bin` holds the content of that version. Content is written
//! first, and renaming the metadata file into place is the only commit
//! point, so a reader never pairs metadata with another version's bytes.
//! Writers to the same key are serialised so superseded content can be
//! removed without orphaning a newer version.

use crate::{
    ListOptions, Listing, ObjectMetadata, ObjectStore, PutOptions, Result, StorageKey, StoreError,
};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use md5::{Digest, Md5};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

const CONTENT_EXT: &str = "bin";
const METADATA_EXT: &str = "json";

/// An object store backed by a local directory
#[derive(Clone, Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl LocalObjectStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().join("objects");
        fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "Opened local object store");
        Ok(Self {
            root,
            locks: Arc::new(DashMap::new()),
        })
    }

    /// Directory holding the object files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read an object's content and metadata
    pub async fn get(&self, key: &str) -> Result<(Bytes, ObjectMetadata)> {
        let id = object_id(key);
        let lock = self.key_lock(key);
        let _guard = lock.lock().await;

        let metadata = self
            .read_metadata(&id)
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let content = fs::read(self.content_path(&id, &metadata.version)).await?;
        Ok((Bytes::from(content), metadata))
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks.entry(key.to_string()).or_default().value().clone()
    }

    fn metadata_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, METADATA_EXT))
    }

    fn content_path(&self, id: &str, version: &str) -> PathBuf {
        self.root.join(format!("{}.{}.{}", id, version, CONTENT_EXT))
    }

    async fn read_metadata(&self, id: &str) -> Result<Option<ObjectMetadata>> {
        match fs::read(self.metadata_path(id)).await {
            Ok(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = self
            .root
            .join(format!(".{}.{}", name, uuid::Uuid::new_v4().simple()));
        fs::write(&tmp, data).await?;
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &StorageKey,
        content: Bytes,
        options: PutOptions,
    ) -> Result<Option<ObjectMetadata>> {
        let id = object_id(key.as_str());
        let metadata = ObjectMetadata::new(key, &content).with_options(options);
        let encoded = serde_json::to_vec_pretty(&metadata)?;

        let lock = self.key_lock(key.as_str());
        let _guard = lock.lock().await;

        let previous = match self.read_metadata(&id).await {
            Ok(previous) => previous,
            Err(e) => {
                warn!(key = %key, error = %e, "Unreadable metadata for overwritten object");
                None
            }
        };

        let content_path = self.content_path(&id, &metadata.version);
        self.write_atomic(&content_path, &content).await?;
        if let Err(e) = self.write_atomic(&self.metadata_path(&id), &encoded).await {
            let _ = fs::remove_file(&content_path).await;
            return Err(e);
        }

        if let Some(previous) = previous.filter(|p| p.version != metadata.version) {
            let stale = self.content_path(&id, &previous.version);
            if let Err(e) = fs::remove_file(&stale).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %stale.display(), error = %e, "Failed to remove superseded content");
                }
            }
        }

        debug!(key = %key, size = metadata.size, "Stored object on disk");
        Ok(Some(metadata))
    }

    async fn list(&self, options: ListOptions) -> Result<Listing> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.root).await?;

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            let is_metadata = path.extension().and_then(|e| e.to_str()) == Some(METADATA_EXT);
            let is_temp = entry.file_name().to_string_lossy().starts_with('.');
            if !is_metadata || is_temp {
                continue;
            }

            let raw = fs::read(&path).await?;
            match serde_json::from_slice::<ObjectMetadata>(&raw) {
                Ok(metadata) => {
                    if options
                        .prefix
                        .as_deref()
                        .map_or(true, |p| metadata.key.starts_with(p))
                    {
                        entries.push(metadata);
                    }
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable metadata"),
            }
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(Listing::from_sorted(entries, &options))
    }
}

fn object_id(key: &str) -> String {
    hex::encode(Md5::digest(key.as_bytes()))
}
