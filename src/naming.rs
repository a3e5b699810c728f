//! Album slug parsing for the `YYYYMMDD_Title` convention.
//!
//! Every album lives under a common key prefix in the bucket, one "folder" per
//! album: `photos/20230101_NewYear/`. The folder name without the root and the
//! trailing delimiter is the **slug**. This module turns slugs into display
//! titles and grouping years, and maps URL paths back to bucket prefixes.
//!
//! ## Display Titles
//!
//! The first eight characters are read as a `YYYYMMDD` date, the rest is the
//! title part (kept as-is, leading underscore included):
//! - `20230101_NewYear` → "Sun 1 Jan 2023 — _NewYear" ([`DateStyle::Home`])
//! - `20230101_NewYear` → "Sun 1 Jan — _NewYear" ([`DateStyle::Teaser`])
//! - `BADDATE_Party` → "BADDATE_Party" (date does not parse, slug verbatim)
//!
//! The year is always the first four characters, whether or not the date
//! parses, so malformed slugs still land in some year group.

use chrono::NaiveDate;
use percent_encoding::percent_decode_str;

/// Separator between the formatted date and the title part.
pub const TITLE_SEPARATOR: &str = " — ";

/// How the date portion of a display title is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Gallery overview and page titles: `Sun 1 Jan 2023`.
    Home,
    /// Recent-albums block: `Sun 1 Jan`.
    Teaser,
}

impl DateStyle {
    fn format_str(self) -> &'static str {
        match self {
            DateStyle::Home => "%a %-d %b %Y",
            DateStyle::Teaser => "%a %-d %b",
        }
    }
}

/// Result of parsing an album slug like `20230101_NewYear`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSlug {
    /// Grouping key: the first four characters of the slug.
    pub year: String,
    /// Formatted date plus title part, or the slug itself when the date fails.
    pub display_title: String,
}

/// Parse an album slug into its grouping year and display title.
///
/// Never fails: a date part that is not a valid `YYYYMMDD` calendar date
/// falls back to the full slug as the title.
pub fn parse_slug(slug: &str, style: DateStyle) -> ParsedSlug {
    let year: String = slug.chars().take(4).collect();

    let display_title = match split_date(slug) {
        Some((date, title_part)) => format!(
            "{}{}{}",
            date.format(style.format_str()),
            TITLE_SEPARATOR,
            title_part
        ),
        None => slug.to_string(),
    };

    ParsedSlug {
        year,
        display_title,
    }
}

/// Split a slug into its parsed date and the remaining title part.
fn split_date(slug: &str) -> Option<(NaiveDate, &str)> {
    let date_part = slug.get(..8)?;
    if !date_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // All ASCII digits, so these slices are on char boundaries.
    let year: i32 = date_part[..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some((date, &slug[8..]))
}

/// Extract the slug from an album prefix: `photos/20230101_X/` → `20230101_X`.
///
/// Strips the root prefix and any trailing delimiter. A prefix outside the
/// root is returned minus its trailing delimiter only.
pub fn slug_from_prefix<'a>(prefix: &'a str, root: &str, delimiter: &str) -> &'a str {
    let without_root = prefix.strip_prefix(root).unwrap_or(prefix);
    without_root
        .strip_suffix(delimiter)
        .unwrap_or(without_root)
}

/// Public URL path for an album: `/photos/<slug>`.
pub fn album_url(slug: &str) -> String {
    format!("/photos/{slug}")
}

/// Map a (possibly URL-encoded) slug from a request path to a bucket prefix.
///
/// `20230101_New%20Year` → `photos/20230101_New Year/`. An empty slug maps to
/// the root prefix itself, which callers route to the gallery overview.
pub fn album_prefix(root: &str, delimiter: &str, slug: &str) -> String {
    let decoded = percent_decode_str(slug).decode_utf8_lossy();
    let mut trimmed: &str = &decoded;
    if !delimiter.is_empty() {
        while let Some(rest) = trimmed.strip_prefix(delimiter) {
            trimmed = rest;
        }
        while let Some(rest) = trimmed.strip_suffix(delimiter) {
            trimmed = rest;
        }
    }
    if trimmed.is_empty() {
        return root.to_string();
    }
    format!("{root}{trimmed}{delimiter}")
}

/// Title for a gallery page: the home title for the overview, the home-style
/// date title for an album.
pub fn page_title(slug: &str, home_title: &str) -> String {
    if slug.is_empty() {
        home_title.to_string()
    } else {
        parse_slug(slug, DateStyle::Home).display_title
    }
}
