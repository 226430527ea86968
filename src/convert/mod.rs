//! OpenAPI → Postman collection conversion
//!
//! The pipeline only sees the [`CollectionConverter`] trait: JSON in, a
//! [`ConversionOutcome`] out. [`OpenApiConverter`] is the built-in
//! implementation.

use serde::Serialize;
use serde_json::Value;

use crate::error::ConversionError;

pub mod openapi;
pub mod postman;
mod schema;

pub use openapi::OpenApiConverter;

/// How requests are grouped into folders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FolderStrategy {
    /// One folder per leading path segment
    #[default]
    Paths,
    /// One folder per operation's first tag
    Tags,
}

/// Format of the document handed to a converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Json,
}

/// Converter input: `{ type: "json", data: <document> }`
#[derive(Debug, Clone)]
pub struct ConversionInput {
    pub kind: InputKind,
    pub data: Value,
}

impl ConversionInput {
    /// Wrap an already-parsed JSON document
    pub fn json(data: Value) -> Self {
        Self {
            kind: InputKind::Json,
            data,
        }
    }
}

/// Kind of a converter output entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Collection,
}

/// One converter output entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionOutput {
    #[serde(rename = "type")]
    pub kind: OutputKind,
    pub data: Value,
}

/// Result reported by a converter that ran to completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionOutcome {
    /// Whether the input was converted
    pub result: bool,

    /// Why the input was declined, when `result` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    pub output: Vec<ConversionOutput>,
}

impl ConversionOutcome {
    /// Successful conversion producing one collection
    pub fn converted(collection: Value) -> Self {
        Self {
            result: true,
            reason: None,
            output: vec![ConversionOutput {
                kind: OutputKind::Collection,
                data: collection,
            }],
        }
    }

    /// The converter declined the input
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            result: false,
            reason: Some(reason.into()),
            output: Vec::new(),
        }
    }

    /// Extract the first collection document.
    ///
    /// A declined outcome becomes [`ConversionError::Rejected`]; a successful
    /// outcome without output is a converter fault.
    pub fn into_collection(self) -> Result<Value, ConversionError> {
        if !self.result {
            return Err(ConversionError::Rejected(
                self.reason.unwrap_or_else(|| "no reason given".to_string()),
            ));
        }

        self.output
            .into_iter()
            .next()
            .map(|output| output.data)
            .ok_or_else(|| {
                ConversionError::Internal("converter reported success but produced no output".to_string())
            })
    }
}

/// Converts an OpenAPI document into a Postman collection
pub trait CollectionConverter: Send + Sync {
    /// Run the conversion.
    ///
    /// `Err` means the converter itself failed; a declined input is reported
    /// through [`ConversionOutcome::rejected`].
    fn convert(&self, input: ConversionInput) -> Result<ConversionOutcome, ConversionError>;
}
