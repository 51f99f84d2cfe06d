//! Listing handler

use crate::envelope::ListEnvelope;
use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use serde::Deserialize;
use shelf_store::{ListOptions, Listing, DEFAULT_DELIMITER, MAX_LIST_LIMIT};
use std::sync::Arc;

/// Query parameters for GET /list
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Key prefix, passed to the store verbatim
    pub catalog: Option<String>,
}

impl ListParams {
    /// Store options for this query: one directory level, up to 1000 entries
    pub fn to_options(&self) -> ListOptions {
        ListOptions {
            limit: MAX_LIST_LIMIT,
            prefix: self.catalog.clone(),
            delimiter: Some(DEFAULT_DELIMITER.to_string()),
            cursor: None,
        }
    }
}

/// GET /list - List objects under `catalog`
pub async fn list_objects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ListEnvelope<Listing> {
    let outcome = state.store.list(params.to_options()).await.map_err(|e| {
        tracing::error!(error = %e, catalog = ?params.catalog, "Failed to list objects");
        ApiError::ListFailed(e)
    });
    ListEnvelope::from(outcome)
}
