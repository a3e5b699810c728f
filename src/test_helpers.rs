//! Shared test utilities for the s3-gal test suite.
//!
//! Provides an in-memory [`MockStore`] that answers listings from a fixed key
//! list and records every call, plus lookup helpers for [`GalleryIndex`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = MockStore::with_keys(&["photos/20230101_NewYear/1.jpg"]);
//! let index = build_gallery_index(&store, &GallerySettings::default()).unwrap();
//!
//! assert_eq!(years_of(&index), vec!["2023"]);
//! let album = find_album(&index, "20230101_NewYear");
//! ```

use std::sync::Mutex;

use crate::gallery::{AlbumSummary, GalleryIndex};
use crate::store::{ObjectStore, StoreError};

// =========================================================================
// In-memory store
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    ListCommonPrefixes { prefix: String, delimiter: String },
    ListObjects { prefix: String, max_keys: Option<usize> },
}

/// Store backed by a key list. Listing order is insertion order, not sorted,
/// so tests can check that callers do their own ordering.
#[derive(Default)]
pub struct MockStore {
    keys: Vec<String>,
    fail_on: Option<String>,
    fail_full_listing_of: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockStore {
    pub fn with_keys(keys: &[&str]) -> Self {
        Self::with_owned_keys(keys.iter().map(|k| k.to_string()).collect())
    }

    pub fn with_owned_keys(keys: Vec<String>) -> Self {
        Self {
            keys,
            ..Self::default()
        }
    }

    /// Make every listing of exactly `prefix` fail.
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.fail_on = Some(prefix.to_string());
        self
    }

    /// Make only uncapped object listings of exactly `prefix` fail, so the
    /// capped preview listing still succeeds.
    pub fn failing_on_full_listing(mut self, prefix: &str) -> Self {
        self.fail_full_listing_of = Some(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, prefix: &str) -> Result<(), StoreError> {
        match &self.fail_on {
            Some(p) if p == prefix => Err(StoreError::unavailable(prefix, "mock failure")),
            _ => Ok(()),
        }
    }
}

impl ObjectStore for MockStore {
    fn list_common_prefixes(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<String>, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::ListCommonPrefixes {
                prefix: prefix.to_string(),
                delimiter: delimiter.to_string(),
            });
        self.check(prefix)?;

        let mut prefixes: Vec<String> = Vec::new();
        for key in &self.keys {
            let Some(rest) = key.strip_prefix(prefix) else {
                continue;
            };
            if let Some(pos) = rest.find(delimiter) {
                let common = format!("{}{}", prefix, &rest[..pos + delimiter.len()]);
                if !prefixes.contains(&common) {
                    prefixes.push(common);
                }
            }
        }
        Ok(prefixes)
    }

    fn list_objects(
        &self,
        prefix: &str,
        max_keys: Option<usize>,
    ) -> Result<Vec<String>, StoreError> {
        self.calls.lock().unwrap().push(RecordedCall::ListObjects {
            prefix: prefix.to_string(),
            max_keys,
        });
        self.check(prefix)?;
        if max_keys.is_none() && self.fail_full_listing_of.as_deref() == Some(prefix) {
            return Err(StoreError::unavailable(prefix, "mock failure"));
        }

        Ok(self
            .keys
            .iter()
            .filter(|k| k.starts_with(prefix))
            .take(max_keys.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://cdn.test/{key}")
    }
}

#[test]
fn mock_groups_common_prefixes_in_insertion_order() {
    let store = MockStore::with_keys(&[
        "photos/b/1.jpg",
        "photos/a/1.jpg",
        "photos/b/2.jpg",
        "photos/loose.jpg",
        "other/c/1.jpg",
    ]);
    assert_eq!(
        store.list_common_prefixes("photos/", "/").unwrap(),
        vec!["photos/b/", "photos/a/"]
    );
}

// =========================================================================
// Index lookups — panics with a clear message on miss
// =========================================================================

/// Find an album by slug anywhere in the index. Panics if not found.
pub fn find_album<'a>(index: &'a GalleryIndex, slug: &str) -> &'a AlbumSummary {
    index
        .albums()
        .find(|a| a.sort_key == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = index.albums().map(|a| a.sort_key.as_str()).collect();
            panic!("album '{slug}' not found. Available: {slugs:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Year keys in index order.
pub fn years_of(index: &GalleryIndex) -> Vec<&str> {
    index.years.iter().map(|y| y.year.as_str()).collect()
}

/// Album sort keys of one year, in index order. Panics if the year is missing.
pub fn sort_keys_of<'a>(index: &'a GalleryIndex, year: &str) -> Vec<&'a str> {
    index
        .years
        .iter()
        .find(|y| y.year == year)
        .unwrap_or_else(|| panic!("year '{year}' not in index: {:?}", years_of(index)))
        .albums
        .iter()
        .map(|a| a.sort_key.as_str())
        .collect()
}
