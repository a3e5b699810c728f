//! Album indexing and preview resolution.
//!
//! Turns a flat bucket namespace into a browsable gallery. Albums are the
//! common prefixes directly under the root prefix; each one is summarised
//! with a display title, a URL path, and one preview photo.
//!
//! ## Listing Model
//!
//! Every operation is synchronous and makes its store calls one after the
//! other: one grouped listing for the album prefixes, then one capped listing
//! per album to find its preview (N+1 round trips for N albums). Only the
//! first page of each listing is used; albums or photos beyond it are not
//! shown.
//!
//! ## Preview Resolution
//!
//! The preview is the first key in store order, among the first
//! `preview_scan_limit` keys of the album, that is not a folder marker. An
//! album whose scanned keys are all markers gets no preview, even when real
//! photos follow further down the listing.
//!
//! ## Errors
//!
//! Any store failure aborts the whole operation, including a failure while
//! resolving a single album's preview. Callers get the error, never a partial
//! index.

use crate::config::GallerySettings;
use crate::naming::{self, DateStyle};
use crate::store::{ObjectStore, StoreError, is_directory_marker};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("object store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// One album as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumSummary {
    /// Site path: `/photos/<slug>`.
    pub url: String,
    pub title: String,
    /// Public URL of the preview photo, if the scan found one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// The album slug; albums within a year sort on it, descending.
    pub sort_key: String,
}

/// Albums of one year, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGroup {
    pub year: String,
    pub albums: Vec<AlbumSummary>,
}

/// Year → albums, years newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GalleryIndex {
    pub years: Vec<YearGroup>,
}

impl GalleryIndex {
    pub fn album_count(&self) -> usize {
        self.years.iter().map(|y| y.albums.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// All albums in display order.
    pub fn albums(&self) -> impl Iterator<Item = &AlbumSummary> {
        self.years.iter().flat_map(|y| y.albums.iter())
    }
}

/// Find a preview photo for the album at `prefix`.
///
/// Scans at most `scan_limit` keys and returns the URL of the first one that
/// is not a folder marker.
pub fn resolve_preview(
    store: &impl ObjectStore,
    prefix: &str,
    scan_limit: usize,
) -> Result<Option<String>, GalleryError> {
    let keys = store.list_objects(prefix, Some(scan_limit))?;
    let preview = keys
        .iter()
        .find(|key| !is_directory_marker(key))
        .map(|key| store.public_url(key));
    if preview.is_none() {
        debug!(prefix, scanned = keys.len(), "no preview in scanned keys");
    }
    Ok(preview)
}

/// Summarise the album at `prefix`, resolving its preview.
fn summarize_album(
    store: &impl ObjectStore,
    settings: &GallerySettings,
    prefix: &str,
    style: DateStyle,
) -> Result<(String, AlbumSummary), GalleryError> {
    let slug = naming::slug_from_prefix(prefix, &settings.root_prefix, &settings.delimiter);
    let parsed = naming::parse_slug(slug, style);
    let preview_url = resolve_preview(store, prefix, settings.preview_scan_limit)?;

    let summary = AlbumSummary {
        url: naming::album_url(slug),
        title: parsed.display_title,
        preview_url,
        sort_key: slug.to_string(),
    };
    Ok((parsed.year, summary))
}

/// Build the year → album index of the whole gallery.
///
/// Years sort descending by string; albums within a year sort descending by
/// slug. Both are plain string comparisons, so slugs with malformed dates
/// sort wherever their characters put them.
pub fn build_gallery_index(
    store: &impl ObjectStore,
    settings: &GallerySettings,
) -> Result<GalleryIndex, GalleryError> {
    let prefixes = store.list_common_prefixes(&settings.root_prefix, &settings.delimiter)?;
    debug!(albums = prefixes.len(), "album prefixes listed");

    let mut by_year: BTreeMap<String, Vec<AlbumSummary>> = BTreeMap::new();
    for prefix in &prefixes {
        let (year, summary) = summarize_album(store, settings, prefix, DateStyle::Home)?;
        by_year.entry(year).or_default().push(summary);
    }

    let years: Vec<YearGroup> = by_year
        .into_iter()
        .rev()
        .map(|(year, mut albums)| {
            albums.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
            YearGroup { year, albums }
        })
        .collect();

    let index = GalleryIndex { years };
    info!(
        years = index.years.len(),
        albums = index.album_count(),
        "gallery index built"
    );
    Ok(index)
}

/// The `limit` most recent albums, newest first, with teaser titles.
///
/// Recency is the raw prefix compared as a string, which for
/// `YYYYMMDD_`-named albums is chronological.
pub fn build_recent_albums(
    store: &impl ObjectStore,
    settings: &GallerySettings,
    limit: usize,
) -> Result<Vec<AlbumSummary>, GalleryError> {
    let mut prefixes = store.list_common_prefixes(&settings.root_prefix, &settings.delimiter)?;
    prefixes.sort_by(|a, b| b.cmp(a));
    prefixes.truncate(limit);

    let albums = prefixes
        .iter()
        .map(|prefix| {
            summarize_album(store, settings, prefix, DateStyle::Teaser).map(|(_, summary)| summary)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(albums = albums.len(), limit, "recent albums selected");
    Ok(albums)
}

/// Public URLs of every photo in the album at `album_prefix`.
///
/// Lists the album without a cap (first page only) and skips folder markers.
pub fn build_album_photo_list(
    store: &impl ObjectStore,
    album_prefix: &str,
) -> Result<Vec<String>, GalleryError> {
    let keys = store.list_objects(album_prefix, None)?;
    let photos: Vec<String> = keys
        .iter()
        .filter(|key| !is_directory_marker(key))
        .map(|key| store.public_url(key))
        .collect();
    debug!(prefix = album_prefix, photos = photos.len(), "album listed");
    Ok(photos)
}
