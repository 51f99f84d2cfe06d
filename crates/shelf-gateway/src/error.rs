//! Error taxonomy for the gateway
//!
//! Every variant is recovered at the HTTP boundary and rendered as a JSON
//! envelope (see [`crate::envelope`]). Upload failures keep the historical
//! `200` status; listing failures use `500`.

use crate::envelope::UploadEnvelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shelf_store::StoreError;
use thiserror::Error;

/// Message for a form without a usable `file` part
pub const MISSING_FILE_MSG: &str = "Oh no, that's too bad :(, missing file field.";

/// Message when the store fails or declines an upload
pub const UPLOAD_FAILED_MSG: &str = "Oh no, upload failed, please try again later";

/// Message when the store fails a listing
pub const LIST_FAILED_MSG: &str = "Oh no, listing failed, please try again later";

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing file field")]
    MissingFile,

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("malformed form data: {0}")]
    MalformedForm(String),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("store declined the upload")]
    UploadDeclined,

    #[error("upload failed: {0}")]
    UploadFailed(#[source] StoreError),

    #[error("listing failed: {0}")]
    ListFailed(#[source] StoreError),
}

impl ApiError {
    /// Map a key derivation error
    pub fn from_key_error(err: StoreError) -> Self {
        match err {
            StoreError::InvalidKey(detail) => Self::InvalidKey(detail),
            other => Self::UploadFailed(other),
        }
    }

    /// Message shown to clients in the envelope's `msg` field
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingFile => MISSING_FILE_MSG.to_string(),
            Self::PayloadTooLarge { limit } => format!(
                "Oh no, that's too bad :(, it exceeded the {} size limit.",
                human_size(*limit)
            ),
            Self::MalformedForm(_) => "Oh no, that's too bad :(, malformed form data.".to_string(),
            Self::InvalidKey(detail) => {
                format!("Oh no, that's too bad :(, invalid catalog or filename ({}).", detail)
            }
            Self::UploadDeclined | Self::UploadFailed(_) => UPLOAD_FAILED_MSG.to_string(),
            Self::ListFailed(_) => LIST_FAILED_MSG.to_string(),
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ListFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Upload-path failures are reported in the body, not the status
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        UploadEnvelope::<()>::from(Err(self)).into_response()
    }
}

/// Render a byte count the way the size-limit message expects ("1M")
fn human_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}M", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}K", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}
