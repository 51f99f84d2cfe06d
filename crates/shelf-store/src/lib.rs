//! # Shelf Store
//!
//! Object storage layer behind the Shelf upload gateway.
//!
//! This crate provides:
//! - **ObjectStore trait**: `put` and `list` over a flat key space
//! - **Key derivation**: catalog + filename to storage key, public URLs
//! - **Listing**: prefix filtering and delimiter folding with a fixed limit
//! - **Backends**: in-memory (tests, development) and local disk
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              Shelf Gateway              │
//! ├─────────────────────────────────────────┤
//! │            ObjectStore Trait            │
//! ├────────────────────┬────────────────────┤
//! │ MemoryObjectStore  │  LocalObjectStore  │
//! ├────────────────────┴────────────────────┤
//! │        FlexibleObjectStore (enum)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use shelf_store::{ListOptions, MemoryObjectStore, ObjectStore, PutOptions, StorageKey};
//!
//! let store = MemoryObjectStore::new();
//! let key = StorageKey::derive("docs", "a.png")?;
//! let meta = store.put(&key, data, PutOptions::default()).await?;
//! let listing = store.list(ListOptions::default().with_prefix("docs")).await?;
//! ```

pub mod error;
pub mod flexible;
pub mod key;
pub mod listing;
pub mod local;
pub mod memory;
pub mod object;

pub use error::{Result, StoreError};
pub use flexible::FlexibleObjectStore;
pub use key::{public_url, StorageKey};
pub use listing::{ListOptions, Listing};
pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;
pub use object::{Checksums, HttpMetadata, ObjectMetadata, PutOptions};

use async_trait::async_trait;
use bytes::Bytes;

/// Maximum number of entries returned by a single listing call
pub const MAX_LIST_LIMIT: usize = 1000;

/// Delimiter used to emulate directories over the flat key space
pub const DEFAULT_DELIMITER: &str = "/";

/// Trait for object storage backends
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `content` under `key`, replacing any existing object.
    ///
    /// Returns `Ok(None)` when the backend declined the write without
    /// raising an error.
    async fn put(
        &self,
        key: &StorageKey,
        content: Bytes,
        options: PutOptions,
    ) -> Result<Option<ObjectMetadata>>;

    /// List objects matching the given options
    async fn list(&self, options: ListOptions) -> Result<Listing>;
}
