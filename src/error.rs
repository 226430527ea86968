//! Error types for swagsync

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for swagsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for HTTP client operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to fetch OpenAPI document: {0}")]
    Fetch(#[source] ApiError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to update Postman collection: {0}")]
    RemoteUpdate(#[source] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP-related errors shared by the document fetcher and the collection API client
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Structured error body returned by the collection API
    #[error("HTTP {status}: {name}: {message}")]
    Remote {
        status: u16,
        name: String,
        message: String,
    },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } | ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network(format!("Failed to connect: {}", err))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Failures reported by a collection converter
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The converter itself faulted
    #[error("Conversion error: {0}")]
    Internal(String),

    /// The converter ran but declined the input
    #[error("Could not convert OpenAPI to Postman: {0}")]
    Rejected(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SWAGGER_URL is not set. Export it or add it to .env.")]
    MissingSwaggerUrl,

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
