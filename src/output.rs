//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Index
//!
//! ```text
//! 2023
//! 001 Sun 1 Jan 2023 — _NewYear
//!     URL: /photos/20230101_NewYear
//!     Preview: https://bucket.s3.eu-west-1.amazonaws.com/photos/20230101_NewYear/1.jpg
//! 2022
//! 001 Mon 4 Jul 2022 — _Independence
//!     URL: /photos/20220704_Independence
//!     Preview: (none)
//!
//! 2 years, 2 albums
//! ```
//!
//! ## Recent
//!
//! ```text
//! 001 Sun 1 Jan — _NewYear
//!     URL: /photos/20230101_NewYear
//!     Preview: ...
//! ```
//!
//! ## Album
//!
//! ```text
//! 001 https://.../1.jpg
//! 002 https://.../2.jpg
//!
//! 2 photos
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.

use crate::config::GalleryConfig;
use crate::gallery::{AlbumSummary, GalleryIndex};
use crate::render::SiteStats;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Header line plus indented URL and preview lines for one album.
fn album_lines(position: usize, album: &AlbumSummary) -> Vec<String> {
    vec![
        format!("{} {}", format_index(position), album.title),
        format!("    URL: {}", album.url),
        format!(
            "    Preview: {}",
            album.preview_url.as_deref().unwrap_or("(none)")
        ),
    ]
}

// ============================================================================
// Index
// ============================================================================

pub fn format_gallery_index(index: &GalleryIndex) -> Vec<String> {
    let mut lines = Vec::new();
    for group in &index.years {
        lines.push(group.year.clone());
        for (i, album) in group.albums.iter().enumerate() {
            lines.extend(album_lines(i + 1, album));
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{}, {}",
        plural(index.years.len(), "year"),
        plural(index.album_count(), "album")
    ));
    lines
}

pub fn print_gallery_index(index: &GalleryIndex) {
    for line in format_gallery_index(index) {
        println!("{}", line);
    }
}

// ============================================================================
// Recent albums
// ============================================================================

pub fn format_recent_albums(albums: &[AlbumSummary]) -> Vec<String> {
    if albums.is_empty() {
        return vec!["No albums".to_string()];
    }
    albums
        .iter()
        .enumerate()
        .flat_map(|(i, album)| album_lines(i + 1, album))
        .collect()
}

pub fn print_recent_albums(albums: &[AlbumSummary]) {
    for line in format_recent_albums(albums) {
        println!("{}", line);
    }
}

// ============================================================================
// Album photos
// ============================================================================

pub fn format_album_photos(title: &str, photos: &[String]) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    lines.extend(
        photos
            .iter()
            .enumerate()
            .map(|(i, url)| format!("{} {}", format_index(i + 1), url)),
    );
    lines.push(String::new());
    lines.push(plural(photos.len(), "photo"));
    lines
}

pub fn print_album_photos(title: &str, photos: &[String]) {
    for line in format_album_photos(title, photos) {
        println!("{}", line);
    }
}

// ============================================================================
// Render / config summaries
// ============================================================================

pub fn format_render_stats(stats: &SiteStats) -> Vec<String> {
    let mut lines = vec![format!(
        "Rendered {}, {}",
        plural(stats.albums, "album"),
        plural(stats.photos, "photo")
    )];
    for slug in &stats.skipped {
        lines.push(format!("    Skipped: {}", slug));
    }
    lines
}

pub fn print_render_stats(stats: &SiteStats) {
    for line in format_render_stats(stats) {
        println!("{}", line);
    }
}

/// Config summary for `check-config`. Never shows the secret key.
pub fn format_config_summary(config: &GalleryConfig) -> Vec<String> {
    let s3 = &config.s3;
    let gallery = &config.gallery;
    let mut lines = vec![
        "S3".to_string(),
        format!("    Bucket: {}", s3.bucket),
        format!("    Region: {}", s3.region),
    ];
    if let Some(endpoint) = &s3.endpoint {
        lines.push(format!("    Endpoint: {}", endpoint));
    }
    if s3.force_path_style {
        lines.push("    Path style: yes".to_string());
    }
    if let Some(base) = &s3.public_base_url {
        lines.push(format!("    Public URL: {}", base));
    }
    lines.extend([
        "Gallery".to_string(),
        format!("    Root: {}", gallery.root_prefix),
        format!("    Preview scan: {} keys", gallery.preview_scan_limit),
        format!("    Recent albums: {}", gallery.recent_limit),
        format!("    Home title: {}", gallery.home_title),
    ]);
    lines
}

pub fn print_config_summary(config: &GalleryConfig) {
    for line in format_config_summary(config) {
        println!("{}", line);
    }
}
