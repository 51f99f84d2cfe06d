//! Storage key derivation and public URL construction
//!
//! A key is `"<catalog>/<filename>"`, or just `"<filename>"` when the
//! catalog is empty. Catalogs may span several segments (`"docs/2024"`).
//! Segments are never `.` or `..`, never empty and never contain control
//! characters, so a key maps one-to-one onto a URL path.

use crate::{Result, StoreError};
use std::fmt;

/// Maximum key length in bytes
pub const MAX_KEY_LENGTH: usize = 1024;

/// A validated object key
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    /// Derive the key for an upload of `filename` under `catalog`
    pub fn derive(catalog: &str, filename: &str) -> Result<Self> {
        let catalog = normalize_catalog(catalog)?;
        let filename = sanitize_filename(filename)?;
        let key = if catalog.is_empty() {
            filename
        } else {
            format!("{}/{}", catalog, filename)
        };
        Self::parse(key)
    }

    /// Validate an already assembled key
    pub fn parse(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(StoreError::InvalidKey("key is empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(StoreError::InvalidKey(format!(
                "key is {} bytes, maximum is {}",
                key.len(),
                MAX_KEY_LENGTH
            )));
        }
        for segment in key.split('/') {
            check_segment(segment)?;
        }
        Ok(Self(key))
    }

    /// Borrow the key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public URL of the object under `base_url`
    pub fn public_url(&self, base_url: &str) -> String {
        public_url(base_url, &self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a user-supplied catalog into a key prefix.
///
/// Leading, trailing and repeated slashes are dropped. An empty or
/// all-slash catalog yields `""`.
pub fn normalize_catalog(catalog: &str) -> Result<String> {
    let segments: Vec<&str> = catalog.split('/').filter(|s| !s.is_empty()).collect();
    for segment in &segments {
        check_segment(segment)
            .map_err(|e| StoreError::InvalidKey(format!("catalog {:?}: {}", catalog, e)))?;
    }
    Ok(segments.join("/"))
}

/// Reduce a client-supplied filename to its last path component.
///
/// Browsers on some platforms send full paths, with either separator.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    check_segment(name)
        .map_err(|e| StoreError::InvalidKey(format!("filename {:?}: {}", filename, e)))?;
    Ok(name.to_string())
}

/// Join `base_url` and `key`, percent-encoding each key segment
pub fn public_url(base_url: &str, key: &str) -> String {
    let path: Vec<String> = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}/{}", base_url.trim_end_matches('/'), path.join("/"))
}

fn check_segment(segment: &str) -> Result<()> {
    match segment {
        "" => Err(StoreError::InvalidKey("empty path segment".to_string())),
        "." | ".." => Err(StoreError::InvalidKey(format!(
            "relative path segment {:?}",
            segment
        ))),
        s if s.chars().any(char::is_control) => Err(StoreError::InvalidKey(
            "control character in path segment".to_string(),
        )),
        _ => Ok(()),
    }
}
