//! Application state

use crate::config::GatewayConfig;
use anyhow::Context;
use shelf_store::{FlexibleObjectStore, MemoryObjectStore, ObjectStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across handlers
pub struct AppState {
    /// Gateway configuration
    pub config: GatewayConfig,
    /// Object store backing uploads and listings
    pub store: Arc<dyn ObjectStore>,
}

impl AppState {
    /// Create application state with the store selected by configuration.
    ///
    /// Fails when the local store is selected but its directory cannot be
    /// opened; the gateway never silently drops to in-memory storage.
    pub async fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let store = if config.use_memory_store {
            info!("Using in-memory object store (data will not persist)");
            FlexibleObjectStore::Memory(MemoryObjectStore::new())
        } else {
            let store = FlexibleObjectStore::local(&config.data_dir)
                .await
                .with_context(|| {
                    format!("failed to open data directory {}", config.data_dir.display())
                })?;
            info!(data_dir = %config.data_dir.display(), "Using local object store");
            store
        };

        if store.is_persistent() {
            info!("✓ Storage mode: local disk (persistent)");
        } else {
            warn!("⚠ Storage mode: In-memory (NOT persistent - for development only)");
        }

        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create application state around an existing store
    pub fn with_store(config: GatewayConfig, store: Arc<dyn ObjectStore>) -> Self {
        Self { config, store }
    }
}
