//! HTTP clients for the OpenAPI source and the Postman collection API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::config::RemoteCollectionHandle;
use crate::error::{ApiError, ApiResult};

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod postman;
pub mod spec;

#[cfg(test)]
pub use mock::{MockCollectionApi, MockSpecSource};
pub use models::{CollectionEnvelope, RemoteCollection, UpdatedCollection};
pub use postman::PostmanClient;
pub use spec::SpecClient;

/// Source of OpenAPI/Swagger documents
#[async_trait]
pub trait SpecSource: Send + Sync {
    /// Fetch and parse the document at `url`
    async fn fetch_spec(&self, url: &str) -> ApiResult<Value>;
}

/// Remote collection store, keyed by collection UID
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// Read the current remote collection
    async fn get_collection(&self, handle: &RemoteCollectionHandle) -> ApiResult<RemoteCollection>;

    /// Overwrite the remote collection with `envelope`
    async fn update_collection(
        &self,
        handle: &RemoteCollectionHandle,
        envelope: &CollectionEnvelope,
    ) -> ApiResult<UpdatedCollection>;
}

/// Build the shared reqwest client with the configured timeout
pub(crate) fn build_http(timeout: Duration) -> ApiResult<HttpClient> {
    HttpClient::builder()
        .timeout(timeout)
        .user_agent(concat!("swagsync/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))
}
