//! Upload handler

use crate::envelope::{Outcome, UploadEnvelope, UploadedObject};
use crate::form::UploadForm;
use crate::{ApiError, AppState};
use axum::extract::{multipart::MultipartRejection, Multipart, State};
use shelf_store::{public_url, PutOptions, StorageKey};
use std::sync::Arc;

/// POST / - Store the form's `file` under `<catalog>/<filename>`
pub async fn upload_object(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> UploadEnvelope<UploadedObject> {
    UploadEnvelope::from(store_upload(&state, multipart).await)
}

async fn store_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Outcome<UploadedObject> {
    // Not a multipart body at all: same as a form without a file
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Upload body is not a multipart form");
        ApiError::MissingFile
    })?;

    let form = UploadForm::from_multipart(multipart, state.config.max_upload_size).await?;
    let key = StorageKey::derive(&form.catalog, &form.file.filename).map_err(|e| {
        tracing::debug!(catalog = %form.catalog, filename = %form.file.filename, error = %e, "Rejected key");
        ApiError::from_key_error(e)
    })?;

    let options = PutOptions {
        content_type: form.file.resolved_content_type(),
        ..Default::default()
    };

    tracing::debug!(key = %key, size = form.file.content.len(), "Storing upload");
    match state.store.put(&key, form.file.content, options).await {
        Ok(Some(metadata)) => {
            let url = public_url(&state.config.base_url, &metadata.key);
            tracing::info!(key = %metadata.key, size = metadata.size, "Upload stored");
            Ok(UploadedObject { metadata, url })
        }
        Ok(None) => {
            tracing::warn!(key = %key, "Store declined the upload");
            Err(ApiError::UploadDeclined)
        }
        Err(e) => {
            tracing::error!(error = %e, key = %key, "Failed to store upload");
            Err(ApiError::UploadFailed(e))
        }
    }
}
