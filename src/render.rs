//! HTML rendering of the gallery.
//!
//! Produces three kinds of output from gallery data:
//!
//! - **Overview** (`index.html`): years newest first, one card per album with
//!   its preview photo and title
//! - **Album pages** (`photos/<slug>/index.html`): every photo as a lightbox link
//! - **Recent albums block** (`recent.html`): an HTML fragment meant to be
//!   embedded in another page
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── recent.html
//! └── photos/
//!     ├── 20230101_NewYear/
//!     │   └── index.html
//!     └── 20220704_Independence/
//!         └── index.html
//! ```
//!
//! Photos are not copied: pages link to their public bucket URLs. The
//! lightbox script is expected at `/fslightbox.js` on the hosting site.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.

use crate::config::GallerySettings;
use crate::gallery::{self, AlbumSummary, GalleryError, GalleryIndex};
use crate::naming;
use crate::store::ObjectStore;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Gallery(#[from] GalleryError),
}

const CSS: &str = include_str!("../static/style.css");
const LIGHTBOX_SCRIPT: &str = "/fslightbox.js";

/// What [`render_site`] wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteStats {
    pub albums: usize,
    pub photos: usize,
    pub skipped: Vec<String>,
}

/// Render the overview, the recent block, and one page per album into
/// `output_dir`.
///
/// Every listing happens before the first write, so a store error aborts the
/// render with nothing written.
pub fn render_site(
    store: &impl ObjectStore,
    settings: &GallerySettings,
    output_dir: &Path,
) -> Result<SiteStats, RenderError> {
    let index = gallery::build_gallery_index(store, settings)?;
    let recent = gallery::build_recent_albums(store, settings, settings.recent_limit)?;

    let mut stats = SiteStats::default();
    let mut pages = Vec::new();
    for album in index.albums() {
        let slug = album.sort_key.as_str();
        if !is_safe_dir_name(slug) {
            warn!(slug, "album name is not a usable directory name, skipping");
            stats.skipped.push(slug.to_string());
            continue;
        }

        // Slugs come straight from the listing, so no URL decoding here.
        let prefix = format!("{}{}{}", settings.root_prefix, slug, settings.delimiter);
        let photos = gallery::build_album_photo_list(store, &prefix)?;
        pages.push((slug, photos));
    }

    fs::create_dir_all(output_dir)?;
    fs::write(
        output_dir.join("index.html"),
        render_home(&index, &settings.home_title).into_string(),
    )?;
    fs::write(
        output_dir.join("recent.html"),
        render_recent_block(&recent).into_string(),
    )?;

    for (slug, photos) in &pages {
        let album_dir = output_dir.join("photos").join(slug);
        fs::create_dir_all(&album_dir)?;
        let title = naming::page_title(slug, &settings.home_title);
        fs::write(
            album_dir.join("index.html"),
            render_album(&title, photos).into_string(),
        )?;

        stats.albums += 1;
        stats.photos += photos.len();
    }

    info!(
        albums = stats.albums,
        photos = stats.photos,
        output = %output_dir.display(),
        "site rendered"
    );
    Ok(stats)
}

fn is_safe_dir_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="nl" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
                script src=(LIGHTBOX_SCRIPT) defer {}
            }
        }
    }
}

/// One album card: preview (if any) and title, linking to the album page.
fn album_card(album: &AlbumSummary) -> Markup {
    html! {
        a.album-card href=(album.url) {
            @if let Some(preview) = &album.preview_url {
                img src=(preview) alt=(album.title) loading="lazy";
            } @else {
                div.album-card-empty {}
            }
            span.album-title { (album.title) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the gallery overview grouped by year
pub fn render_home(index: &GalleryIndex, title: &str) -> Markup {
    let content = html! {
        main.gallery-home {
            h1 { (title) }
            @if index.is_empty() {
                p.gallery-empty { "No albums yet." }
            }
            @for group in &index.years {
                section.gallery-year {
                    h2 { (group.year) }
                    div.album-grid {
                        @for album in &group.albums {
                            (album_card(album))
                        }
                    }
                }
            }
        }
    };

    base_document(title, content)
}

/// Renders an album page with every photo as a lightbox link
pub fn render_album(title: &str, photos: &[String]) -> Markup {
    let content = html! {
        main.album-page {
            nav.breadcrumb {
                a href="/photos" { "Albums" }
                " › "
                (title)
            }
            h1 { (title) }
            div.photo-grid {
                @for (idx, photo) in photos.iter().enumerate() {
                    a.photo-link href=(photo) data-fslightbox="album" {
                        img src=(photo) alt={ (title) " " (idx + 1) } loading="lazy";
                    }
                }
            }
        }
    };

    base_document(title, content)
}

/// Renders the recent-albums block as an embeddable fragment
pub fn render_recent_block(albums: &[AlbumSummary]) -> Markup {
    html! {
        div.recent-albums {
            @for album in albums {
                (album_card(album))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
