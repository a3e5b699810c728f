//! # s3-gal
//!
//! Browse and render a photo gallery stored in an S3-compatible bucket.
//! The bucket is the data source: every folder directly under `photos/` is an
//! album named `YYYYMMDD_Title`, and every object inside it is a photo.
//!
//! ```text
//! photos/
//! ├── 20230101_NewYear/
//! │   ├── IMG_0001.jpg         # First non-folder key = album preview
//! │   └── IMG_0002.jpg
//! └── 20220704_Independence/
//!     └── DSC_1234.jpg
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | Year → album index, recent albums, album photo lists, preview resolution |
//! | [`naming`] | `YYYYMMDD_Title` slug parser: display titles, years, URL ↔ prefix mapping |
//! | [`store`] | The read-only [`store::ObjectStore`] contract the gallery depends on |
//! | [`s3`] | `aws-sdk-s3` implementation of the store contract |
//! | [`config`] | `s3-gal.toml` loading, merging, and validation |
//! | [`render`] | HTML pages and the recent-albums fragment, via Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Store Is Behind a Trait
//!
//! Gallery logic only needs three things from a bucket: grouped prefix
//! listing, capped key listing, and object URLs. Keeping that behind
//! [`store::ObjectStore`] means every ordering and fallback rule is tested
//! against an in-memory store, and any S3-compatible backend works.
//!
//! ## Synchronous, One Listing at a Time
//!
//! An index build lists the album folders once and then makes one small
//! listing per album for its preview. Calls are sequential; there is no
//! cache and no fan-out. The S3 gateway drives the async SDK on its own
//! current-thread runtime so the rest of the crate stays blocking.
//!
//! ## First Page Only
//!
//! Listings never follow continuation tokens. A bucket with more albums than
//! fit in one listing page shows only the first page. The gateway logs a
//! warning whenever S3 reports a truncated listing.
//!
//! ## String Ordering
//!
//! Years and albums sort by plain string comparison, descending. For
//! well-formed slugs that is newest first; malformed slugs are not special
//! cased and land wherever their characters put them.

pub mod config;
pub mod gallery;
pub mod naming;
pub mod output;
pub mod render;
pub mod s3;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
