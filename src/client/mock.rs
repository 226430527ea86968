//! Mock clients for testing
//!
//! In-memory implementations of [`SpecSource`] and [`CollectionApi`] that
//! return canned responses and record every call for assertions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{CollectionApi, CollectionEnvelope, RemoteCollection, SpecSource, UpdatedCollection};
use crate::config::RemoteCollectionHandle;
use crate::error::{ApiError, ApiResult};

/// Mock spec source.
///
/// # Example
/// ```ignore
/// let source = MockSpecSource::returning(json!({ "openapi": "3.0.0" }));
/// let spec = source.fetch_spec("http://localhost/api-json").await?;
/// ```
pub struct MockSpecSource {
    response: ApiResult<Value>,
    requested_urls: Arc<Mutex<Vec<String>>>,
}

impl MockSpecSource {
    /// Always return `spec`
    pub fn returning(spec: Value) -> Self {
        Self {
            response: Ok(spec),
            requested_urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail with `error`
    pub fn failing(error: ApiError) -> Self {
        Self {
            response: Err(error),
            requested_urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs fetched so far
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested_urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpecSource for MockSpecSource {
    async fn fetch_spec(&self, url: &str) -> ApiResult<Value> {
        self.requested_urls.lock().unwrap().push(url.to_string());
        self.response.clone()
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_collection: usize,
    pub update_collection: usize,
}

/// Mock collection API.
///
/// Defaults to a remote collection named "Existing" and a successful update.
pub struct MockCollectionApi {
    get_response: ApiResult<RemoteCollection>,
    update_response: ApiResult<UpdatedCollection>,
    call_count: Arc<Mutex<CallCounts>>,
    /// Envelopes passed to `update_collection`
    captured_updates: Arc<Mutex<Vec<CollectionEnvelope>>>,
    /// Handles seen by any call
    captured_handles: Arc<Mutex<Vec<RemoteCollectionHandle>>>,
}

impl Default for MockCollectionApi {
    fn default() -> Self {
        Self {
            get_response: Ok(RemoteCollection::named("Existing")),
            update_response: Ok(UpdatedCollection {
                id: Some("mock-id".to_string()),
                name: Some("Existing".to_string()),
                uid: Some("mock-uid".to_string()),
            }),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_updates: Arc::new(Mutex::new(Vec::new())),
            captured_handles: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockCollectionApi {
    /// Create a mock with default responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `remote` from `get_collection`
    pub fn with_remote(mut self, remote: RemoteCollection) -> Self {
        self.get_response = Ok(remote);
        self
    }

    /// Fail `get_collection` with `error`
    pub fn with_get_error(mut self, error: ApiError) -> Self {
        self.get_response = Err(error);
        self
    }

    /// Return `updated` from `update_collection`
    pub fn with_updated(mut self, updated: UpdatedCollection) -> Self {
        self.update_response = Ok(updated);
        self
    }

    /// Fail `update_collection` with `error`
    pub fn with_update_error(mut self, error: ApiError) -> Self {
        self.update_response = Err(error);
        self
    }

    /// Snapshot of call counts
    pub fn call_counts(&self) -> CallCounts {
        self.call_count.lock().unwrap().clone()
    }

    /// Envelopes sent to `update_collection`, in order
    pub fn captured_updates(&self) -> Vec<CollectionEnvelope> {
        self.captured_updates.lock().unwrap().clone()
    }

    /// Handles passed to any call, in order
    pub fn captured_handles(&self) -> Vec<RemoteCollectionHandle> {
        self.captured_handles.lock().unwrap().clone()
    }
}

#[async_trait]
impl CollectionApi for MockCollectionApi {
    async fn get_collection(&self, handle: &RemoteCollectionHandle) -> ApiResult<RemoteCollection> {
        self.call_count.lock().unwrap().get_collection += 1;
        self.captured_handles.lock().unwrap().push(handle.clone());
        self.get_response.clone()
    }

    async fn update_collection(
        &self,
        handle: &RemoteCollectionHandle,
        envelope: &CollectionEnvelope,
    ) -> ApiResult<UpdatedCollection> {
        self.call_count.lock().unwrap().update_collection += 1;
        self.captured_handles.lock().unwrap().push(handle.clone());
        self.captured_updates.lock().unwrap().push(envelope.clone());
        self.update_response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handle() -> RemoteCollectionHandle {
        RemoteCollectionHandle {
            uid: "uid-1".to_string(),
            api_key: "key".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_records_updates() {
        let mock = MockCollectionApi::new();
        let envelope = CollectionEnvelope::new(json!({ "info": { "name": "A" } }));

        mock.update_collection(&handle(), &envelope).await.unwrap();

        assert_eq!(mock.call_counts().update_collection, 1);
        assert_eq!(mock.captured_updates(), vec![envelope]);
        assert_eq!(mock.captured_handles(), vec![handle()]);
    }

    #[tokio::test]
    async fn test_mock_get_error() {
        let mock = MockCollectionApi::new().with_get_error(ApiError::Http {
            status: 404,
            body: String::new(),
        });

        assert!(mock.get_collection(&handle()).await.is_err());
        assert_eq!(mock.call_counts().get_collection, 1);
    }

    #[tokio::test]
    async fn test_mock_spec_source_records_url() {
        let source = MockSpecSource::returning(json!({ "openapi": "3.0.0" }));
        source.fetch_spec("http://localhost/api-json").await.unwrap();
        assert_eq!(source.requested_urls(), vec!["http://localhost/api-json"]);
    }
}
