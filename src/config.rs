//! Gallery configuration module.
//!
//! Handles loading, validating, and merging the `s3-gal.toml` file. Stock
//! defaults are serialized to a TOML table and the user file is merged on top,
//! so a config file only needs the keys it wants to change. Validation runs
//! once at startup; the gallery core never looks at raw settings.
//!
//! ## Configuration Options
//!
//! ```toml
//! [s3]
//! region = "eu-west-1"          # Required
//! access_key = "AKIA..."        # Required
//! secret_key = "..."            # Required
//! bucket = "family-photos"      # Required
//! # endpoint = "http://localhost:9000"   # S3-compatible store
//! force_path_style = false
//! # public_base_url = "https://cdn.example.com"
//!
//! [gallery]
//! root_prefix = "photos/"       # Albums live one level below this
//! delimiter = "/"
//! preview_scan_limit = 5        # Keys scanned per album for a preview
//! recent_limit = 4              # Albums in the recent-albums block
//! home_title = "Fotoboek"       # Title of the overview page
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "s3-gal.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Bucket location and credentials.
    pub s3: S3Config,
    /// Key layout and listing sizes.
    pub gallery: GallerySettings,
}

impl GalleryConfig {
    /// Validate config values before any store call is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("s3.region", &self.s3.region),
            ("s3.access_key", &self.s3.access_key),
            ("s3.secret_key", &self.s3.secret_key),
            ("s3.bucket", &self.s3.bucket),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must be set")));
            }
        }
        let gallery = &self.gallery;
        if gallery.delimiter.is_empty() {
            return Err(ConfigError::Validation(
                "gallery.delimiter must not be empty".into(),
            ));
        }
        if !gallery.root_prefix.ends_with(&gallery.delimiter) {
            return Err(ConfigError::Validation(format!(
                "gallery.root_prefix must end with the delimiter '{}'",
                gallery.delimiter
            )));
        }
        if gallery.preview_scan_limit == 0 {
            return Err(ConfigError::Validation(
                "gallery.preview_scan_limit must be at least 1".into(),
            ));
        }
        if gallery.recent_limit == 0 {
            return Err(ConfigError::Validation(
                "gallery.recent_limit must be at least 1".into(),
            ));
        }
        if let Some(endpoint) = &self.s3.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::Validation(
                    "s3.endpoint must be an http(s) URL".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Bucket location and credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct S3Config {
    /// AWS region (also used as the signing region for custom endpoints).
    pub region: String,
    /// Access key id.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: String,
    /// Bucket holding the gallery.
    pub bucket: String,
    /// Endpoint of an S3-compatible store. `None` means AWS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Address the bucket in the path instead of the host name.
    pub force_path_style: bool,
    /// Base URL for public object links (e.g. a CDN). Overrides the bucket URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
}

// Keeps the secret out of logs and error output.
impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("force_path_style", &self.force_path_style)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

/// Key layout and listing sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GallerySettings {
    /// Prefix under which each album is one delimiter-terminated folder.
    pub root_prefix: String,
    /// Folder delimiter used for grouped listings.
    pub delimiter: String,
    /// How many keys to scan in an album when looking for a preview.
    pub preview_scan_limit: usize,
    /// Number of albums in the recent-albums block.
    pub recent_limit: usize,
    /// Title of the gallery overview page.
    pub home_title: String,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            root_prefix: "photos/".to_string(),
            delimiter: "/".to_string(),
            preview_scan_limit: 5,
            recent_limit: 4,
            home_title: "Fotoboek".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, deserialize, validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load and validate the config file at `path`.
///
/// Unlike a site config, the file is required: credentials and the bucket
/// have no usable defaults.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `s3-gal.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# s3-gal Configuration
# ====================
# Values shown under [gallery] are the defaults. The [s3] credentials and
# bucket are required. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Object store
# ---------------------------------------------------------------------------
[s3]
region = "eu-west-1"
access_key = ""
secret_key = ""
bucket = ""

# Endpoint of an S3-compatible store (MinIO, Garage, ...). Omit for AWS.
# endpoint = "http://localhost:9000"

# Address the bucket in the URL path instead of the host name.
force_path_style = false

# Base URL for photo links, e.g. a CDN in front of the bucket.
# public_base_url = "https://cdn.example.com"

# ---------------------------------------------------------------------------
# Gallery layout
# ---------------------------------------------------------------------------
[gallery]
# Albums are the folders directly under this prefix, named YYYYMMDD_Title.
root_prefix = "photos/"
delimiter = "/"

# Keys scanned per album when picking a preview photo. Only the first page
# of this size is looked at; folder markers are skipped.
preview_scan_limit = 5

# Number of albums shown in the recent-albums block.
recent_limit = 4

# Title of the gallery overview page.
home_title = "Fotoboek"
"##
}
