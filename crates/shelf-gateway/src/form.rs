//! Upload form extraction
//!
//! Reads a `multipart/form-data` body into an [`UploadForm`]. A form only
//! counts as having a file when the `file` part carries a filename and at
//! least one byte; anything else is reported as a missing file.

use crate::ApiError;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use tracing::debug;

/// Content type browsers send when they don't know better
const OCTET_STREAM: &str = "application/octet-stream";

/// The `file` part of an upload form
#[derive(Clone, Debug)]
pub struct FilePart {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl FilePart {
    /// Declared content type, or a guess from the filename
    pub fn resolved_content_type(&self) -> Option<String> {
        match self.content_type.as_deref() {
            Some(ct) if !ct.is_empty() && ct != OCTET_STREAM => Some(ct.to_string()),
            declared => mime_guess::from_path(&self.filename)
                .first()
                .map(|m| m.essence_str().to_string())
                .or_else(|| declared.filter(|ct| !ct.is_empty()).map(str::to_string)),
        }
    }
}

/// A validated upload form
#[derive(Clone, Debug)]
pub struct UploadForm {
    pub file: FilePart,
    /// Catalog exactly as submitted; empty when absent
    pub catalog: String,
}

impl UploadForm {
    /// Read and validate the form. `limit` is only used to describe
    /// body-limit errors raised while streaming.
    pub async fn from_multipart(mut multipart: Multipart, limit: usize) -> Result<Self, ApiError> {
        let mut file = None;
        let mut catalog = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, limit))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let filename = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let content = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

                    match filename {
                        Some(filename) if file.is_none() && !filename.is_empty() && !content.is_empty() => {
                            file = Some(FilePart {
                                filename,
                                content_type,
                                content,
                            });
                        }
                        _ => debug!("Ignoring unusable file part"),
                    }
                }
                Some("catalog") => {
                    let value = field.text().await.map_err(|e| multipart_error(e, limit))?;
                    catalog.get_or_insert(value);
                }
                other => {
                    debug!(field = ?other, "Skipping unknown form field");
                    field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                }
            }
        }

        let file = file.ok_or(ApiError::MissingFile)?;
        Ok(Self {
            file,
            catalog: catalog.unwrap_or_default(),
        })
    }
}

fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::MalformedForm(err.body_text())
    }
}
