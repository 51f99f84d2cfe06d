//! Prefix/delimiter listings over a flat key space

use crate::{ObjectMetadata, DEFAULT_DELIMITER, MAX_LIST_LIMIT};
use serde::{Deserialize, Serialize};

/// Options for a list operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of entries (objects plus prefixes), at most 1000
    pub limit: usize,
    /// Only keys starting with this prefix
    pub prefix: Option<String>,
    /// Fold keys containing this delimiter after the prefix
    pub delimiter: Option<String>,
    /// Resume after this key
    pub cursor: Option<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: MAX_LIST_LIMIT,
            prefix: None,
            delimiter: Some(DEFAULT_DELIMITER.to_string()),
            cursor: None,
        }
    }
}

impl ListOptions {
    /// Set the prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set or clear the delimiter
    pub fn with_delimiter(mut self, delimiter: Option<&str>) -> Self {
        self.delimiter = delimiter.map(str::to_string);
        self
    }

    /// Set the resume cursor
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Limit clamped to `1..=MAX_LIST_LIMIT`
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIST_LIMIT)
    }
}

/// Result of a list operation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Objects directly under the prefix
    pub objects: Vec<ObjectMetadata>,
    /// Folded "directories" under the prefix, each ending in the delimiter
    pub delimited_prefixes: Vec<String>,
    /// Whether more entries remain
    pub truncated: bool,
    /// Key to resume from when truncated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl Listing {
    /// Build a listing from entries sorted ascending by key
    pub fn from_sorted<I>(entries: I, options: &ListOptions) -> Self
    where
        I: IntoIterator<Item = ObjectMetadata>,
    {
        let limit = options.effective_limit();
        let prefix = options.prefix.as_deref().unwrap_or("");
        let delimiter = options.delimiter.as_deref().filter(|d| !d.is_empty());

        let mut listing = Listing::default();
        let mut count = 0;
        let mut last_key: Option<String> = None;

        for metadata in entries {
            if !metadata.key.starts_with(prefix) {
                continue;
            }
            if let Some(cursor) = options.cursor.as_deref() {
                if metadata.key.as_str() <= cursor {
                    continue;
                }
            }

            // Keys sharing a common prefix are contiguous in sorted order
            let folded = delimiter.and_then(|delim| {
                let rest = &metadata.key[prefix.len()..];
                rest.find(delim)
                    .map(|pos| format!("{}{}", prefix, &rest[..pos + delim.len()]))
            });

            match folded {
                Some(common) if listing.delimited_prefixes.last() == Some(&common) => {}
                Some(common) => {
                    if count >= limit {
                        listing.truncated = true;
                        break;
                    }
                    listing.delimited_prefixes.push(common);
                    count += 1;
                }
                None => {
                    if count >= limit {
                        listing.truncated = true;
                        break;
                    }
                    last_key = Some(metadata.key.clone());
                    listing.objects.push(metadata);
                    count += 1;
                    continue;
                }
            }
            last_key = Some(metadata.key);
        }

        if listing.truncated {
            listing.cursor = last_key;
        }
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageKey;

    fn entries(keys: &[&str]) -> Vec<ObjectMetadata> {
        let mut keys = keys.to_vec();
        keys.sort();
        keys.into_iter()
            .map(|k| ObjectMetadata::new(&StorageKey::parse(k).unwrap(), k.as_bytes()))
            .collect()
    }

    fn object_keys(listing: &Listing) -> Vec<&str> {
        listing.objects.iter().map(|o| o.key.as_str()).collect()
    }

    #[test]
    fn test_root_listing_folds_directories() {
        let all = entries(&["a.png", "docs/a.png", "docs/b.png", "img/x/y.png"]);
        let listing = Listing::from_sorted(all, &ListOptions::default());

        assert_eq!(object_keys(&listing), vec!["a.png"]);
        assert_eq!(listing.delimited_prefixes, vec!["docs/", "img/"]);
        assert!(!listing.truncated);
        assert!(listing.cursor.is_none());
    }

    #[test]
    fn test_prefix_without_trailing_delimiter() {
        // "docs" also matches "docs/..." and "docsify"
        let all = entries(&["docs/a.png", "docs/sub/b.png", "docsify.md", "other.md"]);
        let listing = Listing::from_sorted(all, &ListOptions::default().with_prefix("docs"));

        assert_eq!(object_keys(&listing), vec!["docsify.md"]);
        assert_eq!(listing.delimited_prefixes, vec!["docs/"]);
    }

    #[test]
    fn test_prefix_with_trailing_delimiter() {
        let all = entries(&["docs/a.png", "docs/sub/b.png", "docs/sub/c.png"]);
        let listing = Listing::from_sorted(all, &ListOptions::default().with_prefix("docs/"));

        assert_eq!(object_keys(&listing), vec!["docs/a.png"]);
        assert_eq!(listing.delimited_prefixes, vec!["docs/sub/"]);
    }

    #[test]
    fn test_no_delimiter_lists_recursively() {
        let all = entries(&["a/b/c", "a/d", "e"]);
        let listing = Listing::from_sorted(all, &ListOptions::default().with_delimiter(None));
        assert_eq!(object_keys(&listing), vec!["a/b/c", "a/d", "e"]);
        assert!(listing.delimited_prefixes.is_empty());
    }

    #[test]
    fn test_limit_truncates_and_resumes() {
        let all = entries(&["k1", "k2", "k3", "k4", "k5"]);
        let first = Listing::from_sorted(all.clone(), &ListOptions::default().with_limit(2));

        assert_eq!(object_keys(&first), vec!["k1", "k2"]);
        assert!(first.truncated);
        assert_eq!(first.cursor.as_deref(), Some("k2"));

        let second = Listing::from_sorted(
            all,
            &ListOptions::default().with_limit(2).with_cursor("k2"),
        );
        assert_eq!(object_keys(&second), vec!["k3", "k4"]);
    }

    #[test]
    fn test_limit_counts_prefixes() {
        let all = entries(&["a/1", "a/2", "b/1", "c"]);
        let listing = Listing::from_sorted(all, &ListOptions::default().with_limit(2));

        assert_eq!(listing.delimited_prefixes, vec!["a/", "b/"]);
        assert!(listing.objects.is_empty());
        assert!(listing.truncated);
    }

    #[test]
    fn test_limit_is_clamped() {
        let options = ListOptions::default().with_limit(5000);
        assert_eq!(options.effective_limit(), MAX_LIST_LIMIT);
        assert_eq!(ListOptions::default().with_limit(0).effective_limit(), 1);
    }

    #[test]
    fn test_fixed_limit_of_one_thousand() {
        let keys: Vec<String> = (0..1005).map(|i| format!("f{:04}", i)).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let listing = Listing::from_sorted(entries(&refs), &ListOptions::default());

        assert_eq!(listing.objects.len(), 1000);
        assert!(listing.truncated);
        assert_eq!(listing.cursor.as_deref(), Some("f0999"));
    }
}
