//! Collection API request and response models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "collection": <document> }` wrapper used on disk and on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEnvelope {
    pub collection: Value,
}

impl CollectionEnvelope {
    /// Wrap a converted collection document
    pub fn new(collection: Value) -> Self {
        Self { collection }
    }

    /// `collection.info.name`, if set to a string
    pub fn name(&self) -> Option<&str> {
        self.collection
            .get("info")
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str)
    }
}

/// Response of `GET /collections/{uid}`, reduced to what we read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteCollection {
    #[serde(default)]
    pub collection: RemoteCollectionBody,
}

/// Body of a remote collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteCollectionBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<RemoteCollectionInfo>,
}

/// Collection metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteCollectionInfo {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Postman-assigned collection ID
    #[serde(rename = "_postman_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RemoteCollection {
    /// Build a remote collection view with the given display name
    #[cfg(test)]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            collection: RemoteCollectionBody {
                info: Some(RemoteCollectionInfo {
                    name: Some(name.into()),
                    id: None,
                }),
            },
        }
    }

    /// Current display name, if the response carried one
    pub fn name(&self) -> Option<&str> {
        self.collection
            .info
            .as_ref()
            .and_then(|info| info.name.as_deref())
    }
}

/// Response of `PUT /collections/{uid}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub collection: UpdatedCollection,
}

/// Identifiers the API reports for an updated collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Structured error body: `{ "error": { "name", "message" } }`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error details reported by the collection API
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub message: String,
}
