//! Postman Collection v2.1 document model

use serde::{Deserialize, Serialize};

/// Collection schema URL written into `info.schema`
pub const SCHEMA_V21: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Variable holding the API base URL
pub const BASE_URL_VARIABLE: &str = "baseUrl";

/// A complete collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: Info,

    #[serde(default)]
    pub item: Vec<Item>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

impl Collection {
    /// Number of requests anywhere in the tree
    pub fn request_count(&self) -> usize {
        self.item.iter().map(Item::request_count).sum()
    }
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub schema: String,
}

/// Folder or request node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Folder(Folder),
    Request(RequestItem),
}

impl Item {
    fn request_count(&self) -> usize {
        match self {
            Item::Folder(folder) => folder.item.iter().map(Item::request_count).sum(),
            Item::Request(_) => 1,
        }
    }
}

/// Folder of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub item: Vec<Item>,
}

/// A saved request with its example responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,

    pub request: Request,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response: Vec<Response>,
}

/// HTTP request definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<Header>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,

    pub url: Url,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
}

/// Request or response header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,

    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
            disabled: false,
        }
    }
}

/// Structured request URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url {
    pub raw: String,

    pub host: Vec<String>,

    pub path: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

/// Query string parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,

    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// Collection or path variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,

    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Variable {
    /// A plain string variable
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
            kind: Some("string".to_string()),
        }
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub mode: BodyMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urlencoded: Vec<FormParam>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formdata: Vec<FormParam>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BodyOptions>,
}

impl Body {
    /// Raw body tagged with an editor language (`json`, `xml`, `text`)
    pub fn raw(content: String, language: &str) -> Self {
        Self {
            mode: BodyMode::Raw,
            raw: Some(content),
            urlencoded: Vec::new(),
            formdata: Vec::new(),
            options: Some(BodyOptions {
                raw: RawOptions {
                    language: language.to_string(),
                },
            }),
        }
    }

    pub fn urlencoded(params: Vec<FormParam>) -> Self {
        Self {
            mode: BodyMode::Urlencoded,
            raw: None,
            urlencoded: params,
            formdata: Vec::new(),
            options: None,
        }
    }

    pub fn formdata(params: Vec<FormParam>) -> Self {
        Self {
            mode: BodyMode::Formdata,
            raw: None,
            urlencoded: Vec::new(),
            formdata: params,
            options: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    Raw,
    Urlencoded,
    Formdata,
}

/// Form field for urlencoded and multipart bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormParam {
    pub key: String,

    pub value: String,

    /// `text` or `file`
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOptions {
    pub language: String,
}

/// Saved example response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub name: String,

    pub code: u16,

    pub status: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<Header>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(
        rename = "_postman_previewlanguage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_language: Option<String>,
}

/// Authentication settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auth {
    #[serde(rename = "type")]
    pub kind: AuthKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apikey: Vec<AuthAttribute>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bearer: Vec<AuthAttribute>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub basic: Vec<AuthAttribute>,
}

impl Auth {
    /// Explicitly unauthenticated
    pub fn none() -> Self {
        Self::with(AuthKind::Noauth, Vec::new())
    }

    /// Build an auth block of `kind` with its attributes
    pub fn with(kind: AuthKind, attributes: Vec<AuthAttribute>) -> Self {
        let mut auth = Self {
            kind,
            apikey: Vec::new(),
            bearer: Vec::new(),
            basic: Vec::new(),
        };
        match kind {
            AuthKind::Apikey => auth.apikey = attributes,
            AuthKind::Bearer => auth.bearer = attributes,
            AuthKind::Basic => auth.basic = attributes,
            AuthKind::Noauth => {}
        }
        auth
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    Apikey,
    Bearer,
    Basic,
    Noauth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthAttribute {
    pub key: String,

    pub value: String,

    #[serde(rename = "type")]
    pub kind: String,
}

impl AuthAttribute {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: "string".to_string(),
        }
    }
}
