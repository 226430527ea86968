//! Run configuration for swagsync
//!
//! Settings come from the environment (optionally seeded from `.env`) and are
//! parsed once at start-up into a [`Config`] that is passed down explicitly.

use std::path::PathBuf;
use std::time::Duration;

use crate::convert::FolderStrategy;
use crate::error::{ConfigError, Result};

/// Default collection API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.getpostman.com";

/// Default local output file
pub const DEFAULT_OUTPUT_FILE: &str = "updated_postman_collection.json";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the OpenAPI/Swagger document
    pub swagger_url: String,

    /// Collection API key
    pub api_key: Option<String>,

    /// UID of the collection to overwrite
    pub collection_uid: Option<String>,

    /// Collection API base URL
    pub api_base_url: String,

    /// Where the converted collection is written
    pub output_path: PathBuf,

    /// Timeout applied to every HTTP request
    pub timeout: Duration,

    /// Folder layout used by the built-in converter
    pub folder_strategy: FolderStrategy,
}

/// Remote collection address plus credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCollectionHandle {
    pub uid: String,
    pub api_key: String,
}

impl Config {
    /// Create a configuration with defaults for everything but the document URL
    pub fn new(swagger_url: impl Into<String>) -> Self {
        Self {
            swagger_url: swagger_url.into(),
            api_key: None,
            collection_uid: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            folder_strategy: FolderStrategy::default(),
        }
    }

    /// Validate that the configuration can drive a run
    pub fn validate(&self) -> Result<()> {
        if self.swagger_url.trim().is_empty() {
            return Err(ConfigError::MissingSwaggerUrl.into());
        }
        check_http_url(&self.swagger_url)?;
        check_http_url(&self.api_base_url)?;

        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be at least one second".to_string()).into());
        }

        Ok(())
    }

    /// Names of the remote settings that are absent or blank
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.api_key) {
            missing.push("POSTMAN_API_KEY");
        }
        if is_blank(&self.collection_uid) {
            missing.push("POSTMAN_COLLECTION_UID");
        }
        missing
    }

    /// Build the remote handle. Missing values become empty strings; the
    /// collection API rejects those requests on its own.
    pub fn remote_handle(&self) -> RemoteCollectionHandle {
        RemoteCollectionHandle {
            uid: self.collection_uid.clone().unwrap_or_default(),
            api_key: self.api_key.clone().unwrap_or_default(),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn check_http_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }
        .into()),
    }
}
