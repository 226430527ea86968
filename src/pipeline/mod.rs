//! The sync run: fetch → convert → persist → resolve name → update
//!
//! Steps run strictly in order. Fetch, conversion, persistence and update
//! failures abort the run. Name resolution is best effort: any failure is
//! reported as a warning and the update goes ahead with the converter's name.

use std::path::PathBuf;

use log::{debug, info, warn};
use serde_json::Value;

use crate::client::{CollectionApi, CollectionEnvelope, SpecSource, UpdatedCollection};
use crate::config::{Config, RemoteCollectionHandle};
use crate::convert::{CollectionConverter, ConversionInput};
use crate::error::{Error, Result};

mod merge;
mod observer;
mod persist;

pub use merge::merge_name;
pub use observer::{PipelineObserver, Stage};
pub use persist::write_envelope;

/// What a successful run did
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Local copy of the converted collection
    pub output_path: PathBuf,

    /// Name sent with the update
    pub collection_name: Option<String>,

    /// Remote name that was kept, when it could be read
    pub preserved_name: Option<String>,

    /// Requests in the converted collection
    pub request_count: usize,

    /// Identifiers reported by the collection API
    pub remote: UpdatedCollection,
}

/// One configured sync run
pub struct Pipeline<'a, S, C, A>
where
    S: SpecSource,
    C: CollectionConverter,
    A: CollectionApi,
{
    config: &'a Config,
    source: &'a S,
    converter: &'a C,
    api: &'a A,
}

impl<'a, S, C, A> Pipeline<'a, S, C, A>
where
    S: SpecSource,
    C: CollectionConverter,
    A: CollectionApi,
{
    pub fn new(config: &'a Config, source: &'a S, converter: &'a C, api: &'a A) -> Self {
        Self {
            config,
            source,
            converter,
            api,
        }
    }

    /// Run every step, notifying `observer` on each transition
    pub async fn run(&self, observer: &dyn PipelineObserver) -> Result<RunReport> {
        let spec = self.fetch(observer).await?;
        let collection = self.convert(spec, observer)?;
        let request_count = count_requests(&collection);

        let mut envelope = CollectionEnvelope::new(collection);
        self.persist(&envelope, observer)?;

        let missing = self.config.missing_credentials();
        if !missing.is_empty() {
            let message = format!(
                "{} not set; the collection API will likely reject the request",
                missing.join(" and ")
            );
            warn!("{}", message);
            observer.warning(&message);
        }

        let handle = self.config.remote_handle();
        let preserved_name = self.resolve_name(&handle, &envelope, observer).await;
        if let Some(name) = &preserved_name {
            merge_name(&mut envelope.collection, name);
        }

        let remote = self.update(&handle, &envelope, observer).await?;

        let report = RunReport {
            output_path: self.config.output_path.clone(),
            collection_name: envelope.name().map(String::from),
            preserved_name,
            request_count,
            remote,
        };
        observer.finished(&report);
        Ok(report)
    }

    async fn fetch(&self, observer: &dyn PipelineObserver) -> Result<Value> {
        let url = &self.config.swagger_url;
        observer.stage_started(Stage::Fetching);
        debug!("Fetching OpenAPI document from {}", url);

        let spec = self
            .source
            .fetch_spec(url)
            .await
            .map_err(Error::Fetch)
            .inspect_err(|err| observer.stage_failed(Stage::Fetching, err))?;

        observer.stage_succeeded(Stage::Fetching, &format!("Fetched OpenAPI document from {}", url));
        Ok(spec)
    }

    fn convert(&self, spec: Value, observer: &dyn PipelineObserver) -> Result<Value> {
        observer.stage_started(Stage::Converting);

        let collection = self
            .converter
            .convert(ConversionInput::json(spec))
            .and_then(|outcome| outcome.into_collection())
            .map_err(Error::from)
            .inspect_err(|err| observer.stage_failed(Stage::Converting, err))?;

        let name = collection
            .pointer("/info/name")
            .and_then(Value::as_str)
            .unwrap_or("unnamed");
        observer.stage_succeeded(
            Stage::Converting,
            &format!(
                "Converted to collection '{}' ({} requests)",
                name,
                count_requests(&collection)
            ),
        );
        Ok(collection)
    }

    fn persist(&self, envelope: &CollectionEnvelope, observer: &dyn PipelineObserver) -> Result<()> {
        let path = &self.config.output_path;
        observer.stage_started(Stage::Persisting);

        write_envelope(path, envelope)
            .inspect_err(|err| observer.stage_failed(Stage::Persisting, err))?;

        debug!("Wrote {}", path.display());
        observer.stage_succeeded(Stage::Persisting, &format!("Saved collection to {}", path.display()));
        Ok(())
    }

    /// Remote display name, or `None` on any failure
    async fn resolve_name(
        &self,
        handle: &RemoteCollectionHandle,
        envelope: &CollectionEnvelope,
        observer: &dyn PipelineObserver,
    ) -> Option<String> {
        observer.stage_started(Stage::ResolvingName);
        let fallback = envelope.name().unwrap_or("unnamed");

        let failure = match self.api.get_collection(handle).await {
            Ok(remote) => match remote.name() {
                Some(name) => {
                    observer.stage_succeeded(
                        Stage::ResolvingName,
                        &format!("Keeping existing collection name '{}'", name),
                    );
                    return Some(name.to_string());
                }
                None => "existing collection has no name".to_string(),
            },
            Err(err) if err.status() == Some(404) => {
                format!("collection {} was not found", handle.uid)
            }
            Err(err) => err.to_string(),
        };

        let message = format!(
            "Could not read the existing collection name ({}); the collection name might be changed to '{}'",
            failure, fallback
        );
        warn!("{}", message);
        observer.stage_warned(Stage::ResolvingName, &message);
        None
    }

    async fn update(
        &self,
        handle: &RemoteCollectionHandle,
        envelope: &CollectionEnvelope,
        observer: &dyn PipelineObserver,
    ) -> Result<UpdatedCollection> {
        observer.stage_started(Stage::Updating);

        let mut updated = self
            .api
            .update_collection(handle, envelope)
            .await
            .map_err(Error::RemoteUpdate)
            .inspect_err(|err| observer.stage_failed(Stage::Updating, err))?;

        if updated.uid.is_none() {
            updated.uid = Some(handle.uid.clone());
        }
        let uid = updated.uid.as_deref().unwrap_or_default();
        info!(
            "Updated collection uid={} name={}",
            uid,
            updated.name.as_deref().unwrap_or("-")
        );
        observer.stage_succeeded(Stage::Updating, &format!("Updated collection {}", uid));
        Ok(updated)
    }
}

/// Requests anywhere in a collection's item tree
fn count_requests(collection: &Value) -> usize {
    fn walk(items: Option<&Value>) -> usize {
        items
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| {
                        if item.get("request").is_some() {
                            1
                        } else {
                            walk(item.get("item"))
                        }
                    })
                    .sum()
            })
            .unwrap_or(0)
    }
    walk(collection.get("item"))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::client::{MockCollectionApi, MockSpecSource, RemoteCollection};
    use crate::convert::{ConversionOutcome, OpenApiConverter};
    use crate::error::{ApiError, ConversionError};

    /// Records transitions as strings
    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl PipelineObserver for RecordingObserver {
        fn stage_started(&self, stage: Stage) {
            self.push(format!("start {:?}", stage));
        }

        fn stage_succeeded(&self, stage: Stage, _message: &str) {
            self.push(format!("ok {:?}", stage));
        }

        fn stage_warned(&self, stage: Stage, _message: &str) {
            self.push(format!("warn {:?}", stage));
        }

        fn stage_failed(&self, stage: Stage, _error: &Error) {
            self.push(format!("fail {:?}", stage));
        }

        fn warning(&self, _message: &str) {
            self.push("warning".to_string());
        }

        fn finished(&self, _report: &RunReport) {
            self.push("finished".to_string());
        }
    }

    /// Converter returning a fixed outcome
    struct FixedConverter(fn() -> std::result::Result<ConversionOutcome, ConversionError>);

    impl CollectionConverter for FixedConverter {
        fn convert(
            &self,
            _input: ConversionInput,
        ) -> std::result::Result<ConversionOutcome, ConversionError> {
            (self.0)()
        }
    }

    fn spec() -> Value {
        json!({
            "openapi": "3.0.0",
            "info": { "title": "API v1", "version": "1" },
            "paths": {
                "/users": { "get": { "summary": "List users", "responses": {} } },
                "/users/{id}": { "get": { "summary": "Get user", "responses": {} } }
            }
        })
    }

    struct Fixture {
        _dir: TempDir,
        config: Config,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new("http://localhost:3000/api-json");
        config.api_key = Some("PMAK-test".to_string());
        config.collection_uid = Some("123-abc".to_string());
        config.output_path = dir.path().join("updated_postman_collection.json");
        Fixture { _dir: dir, config }
    }

    fn read_output(config: &Config) -> Value {
        serde_json::from_str(&fs::read_to_string(&config.output_path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_preserves_existing_name() {
        let fx = fixture();
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new().with_remote(RemoteCollection::named("Production"));
        let observer = RecordingObserver::default();

        let report = Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&observer)
            .await
            .unwrap();

        let updates = api.captured_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].name(), Some("Production"));
        assert_eq!(report.preserved_name.as_deref(), Some("Production"));
        assert_eq!(report.collection_name.as_deref(), Some("Production"));
        assert_eq!(report.request_count, 2);
        assert_eq!(report.remote.uid.as_deref(), Some("mock-uid"));
        assert_eq!(source.requested_urls(), vec!["http://localhost:3000/api-json"]);

        let handles = api.captured_handles();
        assert!(handles.iter().all(|h| h.uid == "123-abc" && h.api_key == "PMAK-test"));

        assert_eq!(
            observer.events(),
            vec![
                "start Fetching",
                "ok Fetching",
                "start Converting",
                "ok Converting",
                "start Persisting",
                "ok Persisting",
                "start ResolvingName",
                "ok ResolvingName",
                "start Updating",
                "ok Updating",
                "finished",
            ]
        );
    }

    #[tokio::test]
    async fn test_report_carries_remote_identifiers() {
        let fx = fixture();
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new().with_updated(UpdatedCollection {
            id: Some("c1".to_string()),
            name: Some("Production".to_string()),
            uid: Some("999-c1".to_string()),
        });

        let report = Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&RecordingObserver::default())
            .await
            .unwrap();

        assert_eq!(report.remote.uid.as_deref(), Some("999-c1"));
        assert_eq!(report.remote.name.as_deref(), Some("Production"));
    }

    #[tokio::test]
    async fn test_bare_update_answer_falls_back_to_configured_uid() {
        let fx = fixture();
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new().with_updated(UpdatedCollection::default());
        let observer = RecordingObserver::default();

        let report = Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&observer)
            .await
            .unwrap();

        assert_eq!(report.remote.uid.as_deref(), Some("123-abc"));
        assert_eq!(report.remote.name, None);
        assert_eq!(observer.events().last().unwrap(), "finished");
    }

    #[tokio::test]
    async fn test_local_file_holds_converter_output() {
        let fx = fixture();
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new().with_remote(RemoteCollection::named("Production"));
        let converter = OpenApiConverter::default();

        Pipeline::new(&fx.config, &source, &converter, &api)
            .run(&RecordingObserver::default())
            .await
            .unwrap();

        let expected = converter
            .convert(ConversionInput::json(spec()))
            .unwrap()
            .into_collection()
            .unwrap();
        let written = read_output(&fx.config);
        assert_eq!(written["collection"], expected);
        assert_eq!(written["collection"]["info"]["name"], "API v1");
    }

    #[tokio::test]
    async fn test_not_found_keeps_converter_name() {
        let fx = fixture();
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new().with_get_error(ApiError::Http {
            status: 404,
            body: "not found".to_string(),
        });
        let observer = RecordingObserver::default();

        let report = Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&observer)
            .await
            .unwrap();

        assert_eq!(api.call_counts().update_collection, 1);
        assert_eq!(api.captured_updates()[0].name(), Some("API v1"));
        assert_eq!(report.preserved_name, None);
        assert!(observer.events().contains(&"warn ResolvingName".to_string()));
        assert!(observer.events().contains(&"ok Updating".to_string()));
    }

    #[tokio::test]
    async fn test_remote_without_name_keeps_converter_name() {
        let fx = fixture();
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new().with_remote(RemoteCollection::default());
        let observer = RecordingObserver::default();

        Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&observer)
            .await
            .unwrap();

        assert_eq!(api.captured_updates()[0].name(), Some("API v1"));
        assert!(observer.events().contains(&"warn ResolvingName".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_conversion_has_no_side_effects() {
        let fx = fixture();
        let source = MockSpecSource::returning(json!({ "info": {}, "paths": {} }));
        let api = MockCollectionApi::new();
        let observer = RecordingObserver::default();

        let err = Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&observer)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Conversion(ConversionError::Rejected(_))));
        assert!(!fx.config.output_path.exists());
        assert_eq!(api.call_counts().get_collection, 0);
        assert_eq!(api.call_counts().update_collection, 0);
        assert_eq!(observer.events().last().unwrap(), "fail Converting");
    }

    #[tokio::test]
    async fn test_converter_fault_is_internal() {
        let fx = fixture();
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new();
        let converter = FixedConverter(|| Err(ConversionError::Internal("boom".to_string())));

        let err = Pipeline::new(&fx.config, &source, &converter, &api)
            .run(&RecordingObserver::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Conversion(ConversionError::Internal(_))));
        assert!(!fx.config.output_path.exists());
        assert_eq!(api.call_counts().update_collection, 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let fx = fixture();
        let source = MockSpecSource::failing(ApiError::Network("Failed to connect".to_string()));
        let api = MockCollectionApi::new();
        let observer = RecordingObserver::default();

        let err = Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&observer)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Fetch(ApiError::Network(_))));
        assert!(!fx.config.output_path.exists());
        assert_eq!(api.call_counts().get_collection, 0);
        assert_eq!(observer.events(), vec!["start Fetching", "fail Fetching"]);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_local_file() {
        let fx = fixture();
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new().with_update_error(ApiError::Http {
            status: 401,
            body: "{\"error\":\"unauthorized\"}".to_string(),
        });
        let observer = RecordingObserver::default();

        let err = Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&observer)
            .await
            .unwrap_err();

        match &err {
            Error::RemoteUpdate(api_err) => assert_eq!(api_err.status(), Some(401)),
            other => panic!("Expected RemoteUpdate, got {:?}", other),
        }
        assert!(err.to_string().contains("unauthorized"));
        assert!(fx.config.output_path.exists());
        assert_eq!(observer.events().last().unwrap(), "fail Updating");
    }

    #[tokio::test]
    async fn test_persist_failure_stops_before_remote() {
        let mut fx = fixture();
        fx.config.output_path = fx._dir.path().join("no-such-dir").join("out.json");
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new();

        let err = Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&RecordingObserver::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Persist { .. }));
        assert_eq!(api.call_counts().get_collection, 0);
        assert_eq!(api.call_counts().update_collection, 0);
    }

    #[tokio::test]
    async fn test_missing_credentials_warn_before_resolving() {
        let mut fx = fixture();
        fx.config.api_key = None;
        let source = MockSpecSource::returning(spec());
        let api = MockCollectionApi::new();
        let observer = RecordingObserver::default();

        Pipeline::new(&fx.config, &source, &OpenApiConverter::default(), &api)
            .run(&observer)
            .await
            .unwrap();

        let events = observer.events();
        let warning = events.iter().position(|e| e == "warning").unwrap();
        let resolving = events.iter().position(|e| e == "start ResolvingName").unwrap();
        assert!(warning < resolving);
        assert_eq!(api.captured_handles()[0].api_key, "");
    }

    #[test]
    fn test_count_requests_walks_folders() {
        let collection = json!({
            "item": [
                { "name": "a", "request": {} },
                { "name": "folder", "item": [{ "name": "b", "request": {} }, { "name": "c", "request": {} }] }
            ]
        });
        assert_eq!(count_requests(&collection), 3);
        assert_eq!(count_requests(&json!({})), 0);
    }
}
