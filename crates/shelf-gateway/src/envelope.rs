//! JSON response envelopes
//!
//! Handlers produce an [`Outcome`]; the envelopes below render it in the
//! two wire shapes existing clients depend on:
//!
//! - upload: `{ "success": bool, "data": T | null, "msg"?: string }`
//! - list:   `{ "code": 0 | 1, "data": T | null, "msg"?: string }`

use crate::ApiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shelf_store::ObjectMetadata;

/// Result of a handler, before it is rendered
pub type Outcome<T> = Result<T, ApiError>;

/// Upload response data: the stored metadata plus its public URL
#[derive(Clone, Debug, Serialize)]
pub struct UploadedObject {
    #[serde(flatten)]
    pub metadata: ObjectMetadata,
    pub url: String,
}

/// `{ success, data, msg }` envelope used by the upload endpoint
#[derive(Debug, Serialize)]
pub struct UploadEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> From<Outcome<T>> for UploadEnvelope<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                msg: None,
                status: StatusCode::OK,
            },
            Err(err) => Self {
                success: false,
                data: None,
                msg: Some(err.public_message()),
                status: err.status_code(),
            },
        }
    }
}

impl<T: Serialize> IntoResponse for UploadEnvelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// `{ code, data, msg }` envelope used by the list endpoint
#[derive(Debug, Serialize)]
pub struct ListEnvelope<T> {
    pub code: i32,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> From<Outcome<T>> for ListEnvelope<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Ok(data) => Self {
                code: 0,
                data: Some(data),
                msg: None,
                status: StatusCode::OK,
            },
            Err(err) => Self {
                code: 1,
                data: None,
                msg: Some(err.public_message()),
                status: err.status_code(),
            },
        }
    }
}

impl<T: Serialize> IntoResponse for ListEnvelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MISSING_FILE_MSG;
    use serde_json::json;
    use shelf_store::{StorageKey, StoreError};

    #[test]
    fn test_upload_failure_shape() {
        let envelope = UploadEnvelope::<()>::from(Err(ApiError::MissingFile));
        assert_eq!(envelope.status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "data": null, "msg": MISSING_FILE_MSG, "success": false })
        );
    }

    #[test]
    fn test_upload_success_flattens_metadata() {
        let key = StorageKey::derive("docs", "a.png").unwrap();
        let metadata = ObjectMetadata::new(&key, b"png");
        let envelope = UploadEnvelope::from(Ok(UploadedObject {
            metadata,
            url: "https://resource.jweboy.asia/docs/a.png".to_string(),
        }));

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["key"], "docs/a.png");
        assert_eq!(value["data"]["url"], "https://resource.jweboy.asia/docs/a.png");
        assert!(value.get("msg").is_none());
    }

    #[test]
    fn test_list_shapes() {
        let ok = ListEnvelope::from(Ok(vec!["x"]));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "code": 0, "data": ["x"] })
        );

        let failed = ListEnvelope::<Vec<&str>>::from(Err(ApiError::ListFailed(
            StoreError::Backend("down".into()),
        )));
        assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["code"], 1);
        assert_eq!(value["data"], serde_json::Value::Null);
    }
}
