//! Built-in OpenAPI 3.x / Swagger 2.0 converter
//!
//! Every operation (path + method pair) becomes one request. Requests are
//! grouped into folders according to the configured [`FolderStrategy`], and
//! the API base URL is exposed as the `{{baseUrl}}` collection variable.

use log::debug;
use reqwest::StatusCode;
use serde_json::{Map, Value};

use super::postman::{
    Auth, AuthAttribute, AuthKind, BASE_URL_VARIABLE, Body, Collection, Folder, FormParam, Header,
    Info, Item, QueryParam, Request, RequestItem, Response, SCHEMA_V21, Url, Variable,
};
use super::schema::{Resolver, to_parameter_value};
use super::{CollectionConverter, ConversionInput, ConversionOutcome, FolderStrategy, InputKind};
use crate::error::ConversionError;

/// Operation keys of a path item, in the order requests are emitted
const METHODS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// Header parameters OpenAPI says to ignore
const RESERVED_HEADERS: [&str; 3] = ["accept", "content-type", "authorization"];

const API_KEY_VARIABLE: &str = "apiKey";
const BEARER_TOKEN_VARIABLE: &str = "bearerToken";
const BASIC_USERNAME_VARIABLE: &str = "basicAuthUsername";
const BASIC_PASSWORD_VARIABLE: &str = "basicAuthPassword";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecVersion {
    OpenApi3,
    Swagger2,
}

/// Converts OpenAPI 3.x and Swagger 2.0 documents
#[derive(Debug, Clone, Default)]
pub struct OpenApiConverter {
    folder_strategy: FolderStrategy,
}

impl OpenApiConverter {
    pub fn new(folder_strategy: FolderStrategy) -> Self {
        Self { folder_strategy }
    }
}

impl CollectionConverter for OpenApiConverter {
    fn convert(&self, input: ConversionInput) -> Result<ConversionOutcome, ConversionError> {
        let ConversionInput {
            kind: InputKind::Json,
            data,
        } = input;

        let version = match check_document(&data) {
            Ok(version) => version,
            Err(reason) => {
                debug!("Declining document: {}", reason);
                return Ok(ConversionOutcome::rejected(reason));
            }
        };

        let collection = Builder::new(&data, version, self.folder_strategy).collection();
        debug!(
            "Converted {:?} document into {} requests ({} top-level items)",
            version,
            collection.request_count(),
            collection.item.len()
        );

        let value = serde_json::to_value(&collection)
            .map_err(|e| ConversionError::Internal(format!("Failed to serialize collection: {}", e)))?;
        Ok(ConversionOutcome::converted(value))
    }
}

/// Check the document shape and detect its version
fn check_document(doc: &Value) -> Result<SpecVersion, String> {
    let Some(root) = doc.as_object() else {
        return Err("Input is not a JSON object".to_string());
    };

    let version = if let Some(version) = root.get("openapi") {
        match version.as_str() {
            Some(v) if v.starts_with("3.") => SpecVersion::OpenApi3,
            _ => return Err(format!("Unsupported OpenAPI version: {}", version)),
        }
    } else if let Some(version) = root.get("swagger") {
        match version.as_str() {
            Some("2.0") => SpecVersion::Swagger2,
            _ => return Err(format!("Unsupported Swagger version: {}", version)),
        }
    } else {
        return Err(
            "Specification must contain a semantic version number of the OAS specification"
                .to_string(),
        );
    };

    if !root.get("info").is_some_and(Value::is_object) {
        return Err("Specification must contain an Info Object for the meta-data of the API".to_string());
    }
    if !root.get("paths").is_some_and(Value::is_object) {
        return Err(
            "Specification must contain Paths Object for the available operational paths"
                .to_string(),
        );
    }

    Ok(version)
}

struct Builder<'a> {
    doc: &'a Value,
    version: SpecVersion,
    resolver: Resolver<'a>,
    folder_strategy: FolderStrategy,
    collection_auth: Option<Auth>,
}

impl<'a> Builder<'a> {
    fn new(doc: &'a Value, version: SpecVersion, folder_strategy: FolderStrategy) -> Self {
        let mut builder = Self {
            doc,
            version,
            resolver: Resolver::new(doc),
            folder_strategy,
            collection_auth: None,
        };
        builder.collection_auth = doc
            .get("security")
            .and_then(|security| builder.auth_for_security(security));
        builder
    }

    fn collection(&self) -> Collection {
        let info = &self.doc["info"];

        let mut variable = vec![Variable::string(BASE_URL_VARIABLE, self.base_url())];
        variable.extend(self.auth_variables());

        Collection {
            info: Info {
                name: str_field(info, "title").unwrap_or("Untitled API").to_string(),
                description: str_field(info, "description").map(String::from),
                schema: SCHEMA_V21.to_string(),
            },
            item: self.items(),
            auth: self.collection_auth.clone(),
            variable,
        }
    }

    fn base_url(&self) -> String {
        let url = match self.version {
            SpecVersion::OpenApi3 => self
                .doc
                .get("servers")
                .and_then(Value::as_array)
                .and_then(|servers| servers.first())
                .and_then(server_url),
            SpecVersion::Swagger2 => {
                let base_path = str_field(self.doc, "basePath").unwrap_or_default();
                str_field(self.doc, "host")
                    .map(|host| {
                        let scheme = self
                            .doc
                            .get("schemes")
                            .and_then(Value::as_array)
                            .and_then(|schemes| schemes.first())
                            .and_then(Value::as_str)
                            .unwrap_or("http");
                        format!("{}://{}{}", scheme, host, base_path)
                    })
                    .or_else(|| Some(base_path.to_string()))
            }
        };

        match url.as_deref().map(|u| u.trim_end_matches('/')) {
            Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
            _ => "/".to_string(),
        }
    }

    fn items(&self) -> Vec<Item> {
        let mut root = Vec::new();
        let Some(paths) = self.doc.get("paths").and_then(Value::as_object) else {
            return root;
        };

        for (path, path_item) in paths {
            let Some(path_item) = self.resolver.resolve(path_item) else {
                debug!("Skipping path {} with unresolvable reference", path);
                continue;
            };
            let shared = path_item.get("parameters");

            for method in METHODS {
                let Some(operation) = path_item.get(method).filter(|op| op.is_object()) else {
                    continue;
                };
                let request = self.request_item(path, method, operation, shared);
                let folder = self.folder_for(path, operation);
                self.insert(&mut root, folder, Item::Request(request));
            }
        }

        match self.folder_strategy {
            FolderStrategy::Paths => collapse_single_request_folders(root),
            FolderStrategy::Tags => root,
        }
    }

    fn folder_for(&self, path: &str, operation: &Value) -> Option<String> {
        match self.folder_strategy {
            FolderStrategy::Tags => operation
                .get("tags")
                .and_then(Value::as_array)
                .and_then(|tags| tags.first())
                .and_then(Value::as_str)
                .map(String::from),
            FolderStrategy::Paths => path
                .split('/')
                .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
                .map(String::from),
        }
    }

    fn insert(&self, root: &mut Vec<Item>, folder: Option<String>, item: Item) {
        let Some(name) = folder else {
            root.push(item);
            return;
        };

        let position = root
            .iter()
            .position(|node| matches!(node, Item::Folder(f) if f.name == name));
        match position {
            Some(index) => {
                if let Item::Folder(folder) = &mut root[index] {
                    folder.item.push(item);
                }
            }
            None => root.push(Item::Folder(Folder {
                description: self.tag_description(&name),
                name,
                item: vec![item],
            })),
        }
    }

    fn tag_description(&self, name: &str) -> Option<String> {
        if self.folder_strategy != FolderStrategy::Tags {
            return None;
        }
        self.doc
            .get("tags")
            .and_then(Value::as_array)?
            .iter()
            .find(|tag| str_field(tag, "name") == Some(name))
            .and_then(|tag| str_field(tag, "description"))
            .map(String::from)
    }

    fn request_item(
        &self,
        path: &str,
        method: &str,
        operation: &'a Value,
        shared: Option<&'a Value>,
    ) -> RequestItem {
        let params = self.parameters(shared, operation);

        let mut header = Vec::new();
        let mut query = Vec::new();
        let mut path_variables = Vec::new();
        let mut cookies = Vec::new();

        for param in &params {
            let Some(name) = str_field(param, "name") else {
                continue;
            };
            let description = str_field(param, "description").map(String::from);
            let required = param.get("required").and_then(Value::as_bool).unwrap_or(false);

            match str_field(param, "in") {
                Some("query") => query.push(QueryParam {
                    key: name.to_string(),
                    value: self.parameter_value(param),
                    description,
                    disabled: !required,
                }),
                Some("path") => path_variables.push(Variable {
                    key: name.to_string(),
                    value: self.parameter_value(param),
                    description,
                    kind: None,
                }),
                Some("header") if !RESERVED_HEADERS.contains(&name.to_ascii_lowercase().as_str()) => {
                    header.push(Header {
                        key: name.to_string(),
                        value: self.parameter_value(param),
                        description,
                        disabled: false,
                    })
                }
                Some("cookie") => cookies.push(format!("{}={}", name, self.parameter_value(param))),
                // body and formData are turned into the request body
                _ => {}
            }
        }

        if !cookies.is_empty() {
            header.push(Header::new("Cookie", cookies.join("; ")));
        }

        let body = match self.version {
            SpecVersion::OpenApi3 => self.request_body(operation, &mut header),
            SpecVersion::Swagger2 => self.swagger_body(operation, &params, &mut header),
        };

        if let Some(accept) = self.accept_type(operation) {
            header.push(Header::new("Accept", accept));
        }

        let name = str_field(operation, "summary")
            .or_else(|| str_field(operation, "operationId"))
            .map(String::from)
            .unwrap_or_else(|| format!("{} {}", method.to_uppercase(), path));

        RequestItem {
            name,
            request: Request {
                method: method.to_uppercase(),
                header,
                body,
                url: build_url(path, query, path_variables),
                description: str_field(operation, "description").map(String::from),
                auth: self.operation_auth(operation),
            },
            response: self.responses(operation),
        }
    }

    /// Path-level parameters overridden by operation-level ones on `(name, in)`
    fn parameters(&self, shared: Option<&'a Value>, operation: &'a Value) -> Vec<&'a Value> {
        let mut merged: Vec<&'a Value> = Vec::new();

        for list in [shared, operation.get("parameters")] {
            let Some(list) = list.and_then(Value::as_array) else {
                continue;
            };
            for param in list {
                let Some(param) = self.resolver.resolve(param) else {
                    continue;
                };
                let key = (str_field(param, "name"), str_field(param, "in"));
                match merged
                    .iter_mut()
                    .find(|existing| (str_field(existing, "name"), str_field(existing, "in")) == key)
                {
                    Some(slot) => *slot = param,
                    None => merged.push(param),
                }
            }
        }

        merged
    }

    /// Placeholder value for a parameter
    fn parameter_value(&self, param: &'a Value) -> String {
        if let Some(example) = param.get("example") {
            return to_parameter_value(example);
        }
        if let Some(value) = self.first_example(param) {
            return to_parameter_value(value);
        }
        // Swagger 2 keeps type information on the parameter itself
        let schema = param.get("schema").unwrap_or(param);
        to_parameter_value(&self.resolver.request_example(schema))
    }

    /// `value` of the first entry in an `examples` map
    fn first_example(&self, holder: &'a Value) -> Option<&'a Value> {
        holder
            .get("examples")
            .and_then(Value::as_object)
            .and_then(|examples| examples.values().next())
            .and_then(|example| self.resolver.resolve(example))
            .and_then(|example| example.get("value"))
    }

    fn media_example(&self, media: &'a Value, for_request: bool) -> Value {
        if let Some(example) = media.get("example") {
            return example.clone();
        }
        if let Some(value) = self.first_example(media) {
            return value.clone();
        }
        match media.get("schema") {
            Some(schema) if for_request => self.resolver.request_example(schema),
            Some(schema) => self.resolver.example(schema),
            None => Value::Null,
        }
    }

    fn request_body(&self, operation: &'a Value, header: &mut Vec<Header>) -> Option<Body> {
        let body = self.resolver.resolve(operation.get("requestBody")?)?;
        let (media_type, media) = pick_media_type(body.get("content")?.as_object()?)?;

        header.push(Header::new("Content-Type", media_type));
        let schema = media.get("schema");

        let lowered = media_type.to_ascii_lowercase();
        let body = if lowered.starts_with("application/x-www-form-urlencoded") {
            Body::urlencoded(self.form_fields(schema, false))
        } else if lowered.starts_with("multipart/form-data") {
            Body::formdata(self.form_fields(schema, true))
        } else {
            raw_body(&lowered, &self.media_example(media, true))
        };
        Some(body)
    }

    fn form_fields(&self, schema: Option<&'a Value>, multipart: bool) -> Vec<FormParam> {
        let Some(schema) = schema.and_then(|s| self.resolver.resolve(s)) else {
            return Vec::new();
        };
        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            return Vec::new();
        };

        properties
            .iter()
            .map(|(key, property)| {
                let resolved = self.resolver.resolve(property).unwrap_or(property);
                let is_file = multipart && is_binary(resolved);
                FormParam {
                    key: key.clone(),
                    value: if is_file {
                        String::new()
                    } else {
                        to_parameter_value(&self.resolver.request_example(property))
                    },
                    kind: form_kind(is_file),
                    description: str_field(resolved, "description").map(String::from),
                }
            })
            .collect()
    }

    fn swagger_body(
        &self,
        operation: &'a Value,
        params: &[&'a Value],
        header: &mut Vec<Header>,
    ) -> Option<Body> {
        let consumes = self.swagger_media_types(operation, "consumes");
        let consumes = consumes
            .iter()
            .copied()
            .find(|m| is_json(m))
            .or_else(|| consumes.first().copied())
            .unwrap_or("application/json");

        if let Some(body_param) = params.iter().find(|p| str_field(p, "in") == Some("body")) {
            let example = body_param
                .get("schema")
                .map(|schema| self.resolver.request_example(schema))
                .unwrap_or(Value::Null);
            header.push(Header::new("Content-Type", consumes));
            return Some(raw_body(&consumes.to_ascii_lowercase(), &example));
        }

        let form: Vec<&'a Value> = params
            .iter()
            .copied()
            .filter(|p| str_field(p, "in") == Some("formData"))
            .collect();
        if form.is_empty() {
            return None;
        }

        let multipart = consumes.starts_with("multipart/form-data")
            || form.iter().any(|p| str_field(p, "type") == Some("file"));
        let fields = form
            .iter()
            .filter_map(|param| {
                let key = str_field(param, "name")?;
                let is_file = str_field(param, "type") == Some("file");
                Some(FormParam {
                    key: key.to_string(),
                    value: if is_file {
                        String::new()
                    } else {
                        self.parameter_value(param)
                    },
                    kind: form_kind(is_file),
                    description: str_field(param, "description").map(String::from),
                })
            })
            .collect();

        if multipart {
            header.push(Header::new("Content-Type", "multipart/form-data"));
            Some(Body::formdata(fields))
        } else {
            header.push(Header::new("Content-Type", "application/x-www-form-urlencoded"));
            Some(Body::urlencoded(fields))
        }
    }

    /// `consumes`/`produces` of the operation, falling back to the document's
    fn swagger_media_types(&self, operation: &'a Value, key: &str) -> Vec<&'a str> {
        operation
            .get(key)
            .or_else(|| self.doc.get(key))
            .and_then(Value::as_array)
            .map(|types| types.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn accept_type(&self, operation: &'a Value) -> Option<String> {
        match self.version {
            SpecVersion::OpenApi3 => {
                let responses = operation.get("responses")?.as_object()?;
                responses
                    .iter()
                    .filter(|(code, _)| code.starts_with('2'))
                    .filter_map(|(_, response)| self.resolver.resolve(response))
                    .filter_map(|response| response.get("content").and_then(Value::as_object))
                    .find_map(pick_media_type)
                    .map(|(media_type, _)| media_type.to_string())
            }
            SpecVersion::Swagger2 => {
                let produces = self.swagger_media_types(operation, "produces");
                produces
                    .iter()
                    .copied()
                    .find(|m| is_json(m))
                    .or_else(|| produces.first().copied())
                    .map(String::from)
            }
        }
    }

    fn responses(&self, operation: &'a Value) -> Vec<Response> {
        let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
            return Vec::new();
        };

        responses
            .iter()
            .filter_map(|(code, response)| {
                let response = self.resolver.resolve(response)?;
                let code: u16 = if code == "default" {
                    500
                } else {
                    code.parse().ok()?
                };
                let status = StatusCode::from_u16(code)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or_default()
                    .to_string();
                let name = str_field(response, "description")
                    .filter(|d| !d.is_empty())
                    .map(String::from)
                    .unwrap_or_else(|| status.clone());

                let mut saved = Response {
                    name,
                    code,
                    status,
                    header: Vec::new(),
                    body: None,
                    preview_language: None,
                };

                if let Some((media_type, example)) = self.response_example(operation, response) {
                    let lowered = media_type.to_ascii_lowercase();
                    saved.header.push(Header::new("Content-Type", media_type));
                    let language = raw_language(&lowered);
                    saved.body = Some(render_raw(language, &example));
                    saved.preview_language = Some(language.to_string());
                }

                Some(saved)
            })
            .collect()
    }

    fn response_example(&self, operation: &'a Value, response: &'a Value) -> Option<(String, Value)> {
        match self.version {
            SpecVersion::OpenApi3 => {
                let (media_type, media) = pick_media_type(response.get("content")?.as_object()?)?;
                Some((media_type.to_string(), self.media_example(media, false)))
            }
            SpecVersion::Swagger2 => {
                if let Some(examples) = response.get("examples").and_then(Value::as_object) {
                    if let Some((media_type, example)) = pick_media_type(examples) {
                        return Some((media_type.to_string(), example.clone()));
                    }
                }
                let schema = response.get("schema")?;
                let media_type = self
                    .accept_type(operation)
                    .unwrap_or_else(|| "application/json".to_string());
                Some((media_type, self.resolver.example(schema)))
            }
        }
    }

    fn security_schemes(&self) -> Option<&'a Map<String, Value>> {
        match self.version {
            SpecVersion::OpenApi3 => self.doc.pointer("/components/securitySchemes"),
            SpecVersion::Swagger2 => self.doc.get("securityDefinitions"),
        }
        .and_then(Value::as_object)
    }

    /// Auth for a security requirement list; an empty list means no auth
    fn auth_for_security(&self, security: &'a Value) -> Option<Auth> {
        let requirements = security.as_array()?;
        if requirements.is_empty() {
            return Some(Auth::none());
        }

        let schemes = self.security_schemes()?;
        requirements
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|requirement| requirement.keys())
            .filter_map(|name| schemes.get(name))
            .filter_map(|scheme| self.resolver.resolve(scheme))
            .find_map(auth_for_scheme)
    }

    /// Operation auth, omitted when it matches what the collection provides
    fn operation_auth(&self, operation: &'a Value) -> Option<Auth> {
        let auth = self.auth_for_security(operation.get("security")?)?;
        if self.collection_auth.as_ref() == Some(&auth) {
            None
        } else {
            Some(auth)
        }
    }

    /// Empty collection variables for every supported security scheme
    fn auth_variables(&self) -> Vec<Variable> {
        let mut variables: Vec<Variable> = Vec::new();
        let Some(schemes) = self.security_schemes() else {
            return variables;
        };

        for scheme in schemes.values().filter_map(|s| self.resolver.resolve(s)) {
            let Some(auth) = auth_for_scheme(scheme) else {
                continue;
            };
            for key in auth_variable_names(auth.kind) {
                if !variables.iter().any(|v| v.key == *key) {
                    variables.push(Variable::string(*key, ""));
                }
            }
        }

        variables
    }
}

fn str_field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value.get(key).and_then(Value::as_str)
}

/// First server URL with its variable defaults substituted
fn server_url(server: &Value) -> Option<String> {
    let mut url = str_field(server, "url")?.to_string();
    if let Some(variables) = server.get("variables").and_then(Value::as_object) {
        for (name, variable) in variables {
            if let Some(default) = variable.get("default") {
                url = url.replace(&format!("{{{}}}", name), &to_parameter_value(default));
            }
        }
    }
    Some(url)
}

fn build_url(path: &str, query: Vec<QueryParam>, variable: Vec<Variable>) -> Url {
    let host = variable_reference(BASE_URL_VARIABLE);
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(to_postman_segment)
        .collect();

    let mut raw = format!("{}/{}", host, segments.join("/"));
    if !query.is_empty() {
        let pairs: Vec<String> = query
            .iter()
            .map(|q| format!("{}={}", q.key, q.value))
            .collect();
        raw.push('?');
        raw.push_str(&pairs.join("&"));
    }

    Url {
        raw,
        host: vec![host],
        path: segments,
        query,
        variable,
    }
}

/// Rewrite `{id}` templates as Postman `:id` path variables
fn to_postman_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push(':');
        out.push_str(&rest[start + 1..start + len]);
        rest = &rest[start + len + 1..];
    }

    out.push_str(rest);
    out
}

fn variable_reference(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// Prefer a JSON media type, else take the first one declared
fn pick_media_type(content: &Map<String, Value>) -> Option<(&str, &Value)> {
    content
        .iter()
        .find(|(media_type, _)| is_json(media_type))
        .or_else(|| content.iter().next())
        .map(|(media_type, media)| (media_type.as_str(), media))
}

fn is_json(media_type: &str) -> bool {
    media_type.to_ascii_lowercase().contains("json")
}

fn is_binary(schema: &Value) -> bool {
    matches!(
        (str_field(schema, "type"), str_field(schema, "format")),
        (Some("string"), Some("binary")) | (Some("file"), _)
    )
}

fn form_kind(is_file: bool) -> String {
    (if is_file { "file" } else { "text" }).to_string()
}

/// Editor language for a (lower-cased) media type
fn raw_language(media_type: &str) -> &'static str {
    if is_json(media_type) {
        "json"
    } else if media_type.contains("xml") {
        "xml"
    } else {
        "text"
    }
}

fn render_raw(language: &str, example: &Value) -> String {
    match example {
        Value::Null => String::new(),
        Value::String(text) if language != "json" => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

fn raw_body(media_type: &str, example: &Value) -> Body {
    let language = raw_language(media_type);
    Body::raw(render_raw(language, example), language)
}

fn auth_for_scheme(scheme: &Value) -> Option<Auth> {
    let http_scheme = str_field(scheme, "scheme").map(str::to_ascii_lowercase);

    match (str_field(scheme, "type")?, http_scheme.as_deref()) {
        ("apiKey", _) => {
            let location = str_field(scheme, "in").filter(|l| *l == "header" || *l == "query")?;
            let name = str_field(scheme, "name")?;
            Some(Auth::with(
                AuthKind::Apikey,
                vec![
                    AuthAttribute::string("key", name),
                    AuthAttribute::string("value", variable_reference(API_KEY_VARIABLE)),
                    AuthAttribute::string("in", location),
                ],
            ))
        }
        ("http", Some("bearer")) => Some(Auth::with(
            AuthKind::Bearer,
            vec![AuthAttribute::string(
                "token",
                variable_reference(BEARER_TOKEN_VARIABLE),
            )],
        )),
        ("http", Some("basic")) | ("basic", _) => Some(Auth::with(
            AuthKind::Basic,
            vec![
                AuthAttribute::string("username", variable_reference(BASIC_USERNAME_VARIABLE)),
                AuthAttribute::string("password", variable_reference(BASIC_PASSWORD_VARIABLE)),
            ],
        )),
        _ => None,
    }
}

fn auth_variable_names(kind: AuthKind) -> &'static [&'static str] {
    match kind {
        AuthKind::Apikey => &[API_KEY_VARIABLE],
        AuthKind::Bearer => &[BEARER_TOKEN_VARIABLE],
        AuthKind::Basic => &[BASIC_USERNAME_VARIABLE, BASIC_PASSWORD_VARIABLE],
        AuthKind::Noauth => &[],
    }
}

/// Replace folders holding a single request with the request itself
fn collapse_single_request_folders(items: Vec<Item>) -> Vec<Item> {
    items
        .into_iter()
        .map(|item| match item {
            Item::Folder(mut folder)
                if folder.item.len() == 1 && matches!(folder.item[0], Item::Request(_)) =>
            {
                folder.item.remove(0)
            }
            other => other,
        })
        .collect()
}
