//! End-to-end checks of the gallery builders through the public API.
//!
//! Uses a small in-memory bucket that lists keys in lexicographic order, the
//! way S3 does, so these tests exercise the same ordering a real bucket gives.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use s3_gal::config::GallerySettings;
use s3_gal::gallery::{self, GalleryError};
use s3_gal::store::{ObjectStore, StoreError};

struct Bucket {
    keys: BTreeSet<String>,
    down: Cell<bool>,
    fail_prefix: RefCell<Option<String>>,
}

impl Bucket {
    fn new(keys: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            down: Cell::new(false),
            fail_prefix: RefCell::new(None),
        }
    }

    fn check(&self, prefix: &str) -> Result<(), StoreError> {
        let failing = self.fail_prefix.borrow().as_deref() == Some(prefix);
        if self.down.get() || failing {
            return Err(StoreError::unavailable(prefix, "503 Service Unavailable"));
        }
        Ok(())
    }
}

impl ObjectStore for Bucket {
    fn list_common_prefixes(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<String>, StoreError> {
        self.check(prefix)?;
        let grouped: BTreeSet<String> = self
            .keys
            .iter()
            .filter_map(|k| k.strip_prefix(prefix))
            .filter_map(|rest| {
                rest.find(delimiter)
                    .map(|pos| format!("{}{}", prefix, &rest[..pos + delimiter.len()]))
            })
            .collect();
        Ok(grouped.into_iter().collect())
    }

    fn list_objects(
        &self,
        prefix: &str,
        max_keys: Option<usize>,
    ) -> Result<Vec<String>, StoreError> {
        self.check(prefix)?;
        Ok(self
            .keys
            .iter()
            .filter(|k| k.starts_with(prefix))
            .take(max_keys.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://bucket.example/{key}")
    }
}

fn two_year_bucket() -> Bucket {
    Bucket::new(&[
        "photos/20220704_Independence/",
        "photos/20220704_Independence/fireworks.jpg",
        "photos/20230101_NewYear/",
        "photos/20230101_NewYear/toast.jpg",
    ])
}

#[test]
fn two_albums_in_two_years() {
    let bucket = two_year_bucket();
    let index = gallery::build_gallery_index(&bucket, &GallerySettings::default()).unwrap();

    let years: Vec<&str> = index.years.iter().map(|y| y.year.as_str()).collect();
    assert_eq!(years, vec!["2023", "2022"]);

    let new_year = &index.years[0].albums;
    assert_eq!(new_year.len(), 1);
    assert!(new_year[0].title.starts_with("Sun 1 Jan 2023"));
    assert_eq!(
        new_year[0].preview_url.as_deref(),
        Some("https://bucket.example/photos/20230101_NewYear/toast.jpg")
    );

    let independence = &index.years[1].albums;
    assert_eq!(independence.len(), 1);
    assert!(independence[0].title.starts_with("Mon 4 Jul 2022"));
}

#[test]
fn bad_date_album_keeps_its_name() {
    let bucket = Bucket::new(&["photos/BADDATE_Party/cake.jpg"]);
    let index = gallery::build_gallery_index(&bucket, &GallerySettings::default()).unwrap();
    assert_eq!(index.years[0].year, "BADD");
    assert_eq!(index.years[0].albums[0].title, "BADDATE_Party");
}

#[test]
fn index_is_strictly_ordered() {
    let bucket = Bucket::new(&[
        "photos/20190301_A/1.jpg",
        "photos/20231111_B/1.jpg",
        "photos/20230202_C/1.jpg",
        "photos/20190915_D/1.jpg",
        "photos/20210101_E/1.jpg",
        "photos/2023_NoDate/1.jpg",
    ]);
    let index = gallery::build_gallery_index(&bucket, &GallerySettings::default()).unwrap();

    for pair in index.years.windows(2) {
        assert!(pair[0].year > pair[1].year, "{} !> {}", pair[0].year, pair[1].year);
    }
    for group in &index.years {
        for pair in group.albums.windows(2) {
            assert!(pair[0].sort_key >= pair[1].sort_key);
        }
    }
    assert_eq!(index.album_count(), 6);
}

#[test]
fn root_listing_failure_returns_single_error() {
    let bucket = two_year_bucket();
    bucket.down.set(true);
    let result = gallery::build_gallery_index(&bucket, &GallerySettings::default());
    assert!(matches!(result, Err(GalleryError::StoreUnavailable(_))));
}

#[test]
fn preview_failure_fails_whole_index() {
    let bucket = two_year_bucket();
    *bucket.fail_prefix.borrow_mut() = Some("photos/20220704_Independence/".to_string());
    assert!(gallery::build_gallery_index(&bucket, &GallerySettings::default()).is_err());
}

#[test]
fn rebuilding_unchanged_bucket_is_identical() {
    let bucket = two_year_bucket();
    let settings = GallerySettings::default();
    let first = gallery::build_gallery_index(&bucket, &settings).unwrap();
    let second = gallery::build_gallery_index(&bucket, &settings).unwrap();
    assert_eq!(first, second);
}

#[test]
fn recent_albums_are_capped_and_newest_first() {
    let bucket = Bucket::new(&[
        "photos/20200101_A/1.jpg",
        "photos/20210101_B/1.jpg",
        "photos/20220101_C/1.jpg",
        "photos/20230101_D/1.jpg",
        "photos/20240101_E/1.jpg",
    ]);
    let recent = gallery::build_recent_albums(&bucket, &GallerySettings::default(), 4).unwrap();
    let slugs: Vec<&str> = recent.iter().map(|a| a.sort_key.as_str()).collect();
    assert_eq!(slugs, vec!["20240101_E", "20230101_D", "20220101_C", "20210101_B"]);
    assert_eq!(recent[0].title, "Mon 1 Jan — _E");
}

#[test]
fn recent_albums_with_fewer_than_limit() {
    let bucket = two_year_bucket();
    let recent = gallery::build_recent_albums(&bucket, &GallerySettings::default(), 4).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].sort_key, "20230101_NewYear");
}

#[test]
fn preview_missing_when_first_five_keys_are_folders() {
    let bucket = Bucket::new(&[
        "photos/20230101_Nested/",
        "photos/20230101_Nested/a/",
        "photos/20230101_Nested/b/",
        "photos/20230101_Nested/c/",
        "photos/20230101_Nested/d/",
        "photos/20230101_Nested/e.jpg",
    ]);
    let preview = gallery::resolve_preview(&bucket, "photos/20230101_Nested/", 5).unwrap();
    assert_eq!(preview, None);

    let photos = gallery::build_album_photo_list(&bucket, "photos/20230101_Nested/").unwrap();
    assert_eq!(photos, vec!["https://bucket.example/photos/20230101_Nested/e.jpg"]);
}
