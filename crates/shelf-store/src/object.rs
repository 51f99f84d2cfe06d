//! Object metadata types

use crate::StorageKey;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// HTTP headers recorded alongside an object
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpMetadata {
    /// Content type (MIME type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Content checksums
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksums {
    /// Hex-encoded MD5 of the content
    pub md5: String,
}

/// Metadata for a stored object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// Full storage key
    pub key: String,

    /// Unique id of this write; changes on every overwrite
    pub version: String,

    /// Size in bytes
    pub size: u64,

    /// ETag (hex MD5)
    pub etag: String,

    /// ETag quoted for use in HTTP headers
    pub http_etag: String,

    /// Upload timestamp
    pub uploaded: DateTime<Utc>,

    /// Recorded HTTP metadata
    #[serde(default)]
    pub http_metadata: HttpMetadata,

    /// User-defined metadata
    #[serde(default)]
    pub custom_metadata: BTreeMap<String, String>,

    /// Content checksums
    #[serde(default)]
    pub checksums: Checksums,
}

impl ObjectMetadata {
    /// Create metadata for freshly written content
    pub fn new(key: &StorageKey, content: &[u8]) -> Self {
        let etag = md5_hex(content);
        Self {
            key: key.as_str().to_string(),
            version: uuid::Uuid::new_v4().simple().to_string(),
            size: content.len() as u64,
            http_etag: format!("\"{}\"", etag),
            checksums: Checksums { md5: etag.clone() },
            etag,
            uploaded: Utc::now(),
            http_metadata: HttpMetadata::default(),
            custom_metadata: BTreeMap::new(),
        }
    }

    /// Apply put options
    pub fn with_options(mut self, options: PutOptions) -> Self {
        self.http_metadata.content_type = options.content_type;
        self.custom_metadata = options.custom_metadata;
        self
    }
}

/// Options for a put operation
#[derive(Clone, Debug, Default)]
pub struct PutOptions {
    /// Content type to record
    pub content_type: Option<String>,
    /// User-defined metadata to record
    pub custom_metadata: BTreeMap<String, String>,
}

impl PutOptions {
    /// Set the content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

fn md5_hex(content: &[u8]) -> String {
    hex::encode(Md5::digest(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_from_content() {
        let key = StorageKey::derive("docs", "a.txt").unwrap();
        let meta = ObjectMetadata::new(&key, b"hello");

        assert_eq!(meta.key, "docs/a.txt");
        assert_eq!(meta.size, 5);
        assert_eq!(meta.etag, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(meta.http_etag, "\"5d41402abc4b2a76b9719d911017c592\"");
        assert_eq!(meta.checksums.md5, meta.etag);
    }

    #[test]
    fn test_versions_differ_per_write() {
        let key = StorageKey::derive("", "a.txt").unwrap();
        let first = ObjectMetadata::new(&key, b"x");
        let second = ObjectMetadata::new(&key, b"x");
        assert_ne!(first.version, second.version);
    }

    #[test]
    fn test_serializes_camel_case() {
        let key = StorageKey::derive("", "a.png").unwrap();
        let meta = ObjectMetadata::new(&key, b"png")
            .with_options(PutOptions::default().with_content_type("image/png"));
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["key"], "a.png");
        assert_eq!(json["httpMetadata"]["contentType"], "image/png");
        assert!(json.get("httpEtag").is_some());
        assert!(json.get("customMetadata").is_some());
    }
}
