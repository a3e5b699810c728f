//! S3-backed [`ObjectStore`] implementation.
//!
//! Wraps an `aws_sdk_s3::Client` built from explicit [`S3Config`] credentials.
//! The SDK is async; [`S3Store`] owns a current-thread tokio runtime and blocks
//! on each request, so callers see plain synchronous calls and one network
//! round trip per listing.
//!
//! Listings are single-page `ListObjectsV2` requests. When S3 reports a
//! truncated page the extra results are dropped and a warning is logged.

use crate::config::S3Config;
use crate::store::{ObjectStore, StoreError};
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// Characters left unescaped in object URLs (RFC 3986 unreserved plus `/`).
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

pub struct S3Store {
    client: aws_sdk_s3::Client,
    runtime: Runtime,
    config: S3Config,
}

impl S3Store {
    /// Build a client for the configured bucket. No request is made here.
    pub fn connect(config: &S3Config) -> Result<Self, StoreError> {
        let creds = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "s3-gal-config",
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(creds)
            .force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        debug!(bucket = %config.bucket, region = %config.region, "S3 client configured");
        Self::with_client(aws_sdk_s3::Client::from_conf(builder.build()), config)
    }

    /// Wrap an already configured client. `config` still supplies the bucket
    /// and the public URL layout.
    pub fn with_client(
        client: aws_sdk_s3::Client,
        config: &S3Config,
    ) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            client,
            runtime,
            config: config.clone(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

impl ObjectStore for S3Store {
    fn list_common_prefixes(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> Result<Vec<String>, StoreError> {
        debug!(prefix, delimiter, "listing common prefixes");
        let request = self
            .client
            .list_objects_v2()
            .bucket(&self.config.bucket)
            .prefix(prefix)
            .delimiter(delimiter)
            .send();
        let output = self
            .runtime
            .block_on(request)
            .map_err(|e| StoreError::unavailable(prefix, DisplayErrorContext(&e)))?;

        if output.is_truncated() == Some(true) {
            warn!(prefix, "prefix listing truncated, only the first page is used");
        }

        Ok(output
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix().map(str::to_owned))
            .collect())
    }

    fn list_objects(
        &self,
        prefix: &str,
        max_keys: Option<usize>,
    ) -> Result<Vec<String>, StoreError> {
        debug!(prefix, ?max_keys, "listing objects");
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(&self.config.bucket)
            .prefix(prefix);
        if let Some(max) = max_keys {
            request = request.max_keys(i32::try_from(max).unwrap_or(i32::MAX));
        }
        let output = self
            .runtime
            .block_on(request.send())
            .map_err(|e| StoreError::unavailable(prefix, DisplayErrorContext(&e)))?;

        // A capped preview scan is expected to be truncated.
        if max_keys.is_none() && output.is_truncated() == Some(true) {
            warn!(prefix, "object listing truncated, only the first page is used");
        }

        Ok(output
            .contents()
            .iter()
            .filter_map(|o| o.key().map(str::to_owned))
            .collect())
    }

    fn public_url(&self, key: &str) -> String {
        object_url(&self.config, key)
    }
}

/// Public URL of an object, following the bucket addressing the config selects.
///
/// - `public_base_url` set: `<base>/<key>`
/// - AWS: `https://<bucket>.s3.<region>.amazonaws.com/<key>`
/// - custom endpoint, path style: `<endpoint>/<bucket>/<key>`
/// - custom endpoint, host style: `<scheme>://<bucket>.<host>/<key>`
pub fn object_url(config: &S3Config, key: &str) -> String {
    let key = utf8_percent_encode(key, KEY_ENCODE_SET);

    if let Some(base) = &config.public_base_url {
        return format!("{}/{}", base.trim_end_matches('/'), key);
    }

    match &config.endpoint {
        None if config.force_path_style => format!(
            "https://s3.{}.amazonaws.com/{}/{}",
            config.region, config.bucket, key
        ),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            config.bucket, config.region, key
        ),
        Some(endpoint) => {
            let endpoint = endpoint.trim_end_matches('/');
            match endpoint.split_once("://") {
                Some((scheme, host)) if !config.force_path_style => {
                    format!("{}://{}.{}/{}", scheme, config.bucket, host, key)
                }
                _ => format!("{}/{}/{}", endpoint, config.bucket, key),
            }
        }
    }
}
