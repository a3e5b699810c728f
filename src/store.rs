//! Object store gateway trait and shared error type.
//!
//! The [`ObjectStore`] trait is the narrow read-only contract the gallery core
//! depends on: delimiter-grouped prefix listing, capped key listing, and
//! public URL construction. Every call is a single page; continuation tokens
//! are never followed.
//!
//! The production implementation is [`S3Store`](crate::s3::S3Store). Tests
//! use an in-memory store that records calls.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("listing '{prefix}' failed: {message}")]
    Unavailable { prefix: String, message: String },
    #[error("could not start store runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl StoreError {
    pub fn unavailable(prefix: &str, message: impl ToString) -> Self {
        StoreError::Unavailable {
            prefix: prefix.to_string(),
            message: message.to_string(),
        }
    }
}

/// Read-only access to a flat key namespace.
pub trait ObjectStore {
    /// Common prefixes directly under `prefix`, grouped by `delimiter`, in
    /// store order. First page only.
    fn list_common_prefixes(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<String>, StoreError>;

    /// Object keys starting with `prefix`, in store order, at most `max_keys`
    /// when given. First page only.
    fn list_objects(
        &self,
        prefix: &str,
        max_keys: Option<usize>,
    ) -> Result<Vec<String>, StoreError>;

    /// Public URL for an object key. Pure; no network call.
    fn public_url(&self, key: &str) -> String;
}

/// Whether a key is a pseudo-folder rather than a real object.
pub fn is_directory_marker(key: &str) -> bool {
    key.ends_with('/')
}
