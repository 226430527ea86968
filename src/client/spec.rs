//! OpenAPI document fetcher

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde_json::Value;

use super::{SpecSource, build_http};
use crate::error::{ApiError, ApiResult};

/// Fetches OpenAPI/Swagger documents over HTTP
pub struct SpecClient {
    http: HttpClient,
}

impl SpecClient {
    /// Create a fetcher with the given request timeout
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            http: build_http(timeout)?,
        })
    }
}

/// Parse a document body as JSON, falling back to YAML.
///
/// Any JSON value is accepted as-is. A YAML fallback must produce a mapping,
/// otherwise arbitrary text (an HTML error page, say) would parse as a string.
pub fn parse_document(body: &str) -> ApiResult<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return Ok(value);
    }

    match serde_yaml::from_str::<Value>(body) {
        Ok(value) if value.is_object() => {
            debug!("Parsed OpenAPI document as YAML");
            Ok(value)
        }
        _ => Err(ApiError::InvalidResponse(
            "Response body is neither a JSON nor a YAML document".to_string(),
        )),
    }
}

#[async_trait]
impl SpecSource for SpecClient {
    async fn fetch_spec(&self, url: &str) -> ApiResult<Value> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json, application/yaml;q=0.9, */*;q=0.8")
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        debug!("{} answered {}", url, status);

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        parse_document(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SpecClient {
        SpecClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_json_document() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api-json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "openapi": "3.0.0", "info": { "title": "API v1" }, "paths": {} }"#)
            .create_async()
            .await;

        let spec = client()
            .fetch_spec(&format!("{}/api-json", server.url()))
            .await
            .unwrap();

        assert_eq!(spec["openapi"], "3.0.0");
        assert_eq!(spec["info"]["title"], "API v1");
    }

    #[tokio::test]
    async fn test_fetch_yaml_document() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api-yaml")
            .with_status(200)
            .with_body("openapi: 3.0.0\ninfo:\n  title: YAML API\npaths: {}\n")
            .create_async()
            .await;

        let spec = client()
            .fetch_spec(&format!("{}/api-yaml", server.url()))
            .await
            .unwrap();

        assert_eq!(spec["info"]["title"], "YAML API");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api-json")
            .with_status(503)
            .with_body("starting up")
            .create_async()
            .await;

        let err = client()
            .fetch_spec(&format!("{}/api-json", server.url()))
            .await
            .unwrap_err();

        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "starting up");
            }
            other => panic!("Expected ApiError::Http, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_network_error() {
        // Port 9 (discard) is not expected to be listening on loopback
        let err = client()
            .fetch_spec("http://127.0.0.1:9/api-json")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn test_parse_document_rejects_plain_text() {
        let err = parse_document("<html>Not Found</html>").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_document_keeps_json_scalars() {
        assert_eq!(parse_document("42").unwrap(), Value::from(42));
    }
}
