//! Reference resolution and example generation for OpenAPI schemas
//!
//! Only references local to the document (`#/...`) are followed. Cycles and
//! unresolvable references degrade to a `<ref>` placeholder instead of failing
//! the conversion.

use log::debug;
use serde_json::{Map, Value};

/// Maximum schema nesting explored when generating examples
const MAX_DEPTH: usize = 12;

/// Maximum `$ref` hops followed for a single lookup
const MAX_REF_HOPS: usize = 16;

/// Placeholder for references we cannot expand
const REF_PLACEHOLDER: &str = "<ref>";

/// Resolves `$ref`s against one document and builds example values
pub struct Resolver<'a> {
    root: &'a Value,
}

impl<'a> Resolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Look up a local reference such as `#/components/schemas/User`
    pub fn lookup(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(self.root);
        }
        self.root.pointer(pointer)
    }

    /// Follow `$ref` chains until a concrete value is reached.
    ///
    /// Values without `$ref` are returned unchanged. Returns `None` for
    /// dangling, external or looping references.
    pub fn resolve(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        for _ in 0..MAX_REF_HOPS {
            match ref_of(current) {
                Some(reference) => {
                    current = self.lookup(reference).or_else(|| {
                        debug!("Unresolvable reference {}", reference);
                        None
                    })?;
                }
                None => return Some(current),
            }
        }
        debug!("Reference chain too long, giving up");
        None
    }

    /// Build an example value for `schema`, as a server would return it
    pub fn example(&self, schema: &'a Value) -> Value {
        self.example_at(schema, 0, &mut Walk::new(false))
    }

    /// Build an example value for `schema` as a request body, leaving out
    /// `readOnly` properties
    pub fn request_example(&self, schema: &'a Value) -> Value {
        self.example_at(schema, 0, &mut Walk::new(true))
    }

    fn example_at(&self, schema: &'a Value, depth: usize, walk: &mut Walk<'a>) -> Value {
        if depth > MAX_DEPTH {
            return Value::String("<object>".to_string());
        }

        if let Some(reference) = ref_of(schema) {
            if walk.visiting.contains(&reference) {
                return Value::String(REF_PLACEHOLDER.to_string());
            }
            let Some(target) = self.lookup(reference) else {
                return Value::String(REF_PLACEHOLDER.to_string());
            };
            walk.visiting.push(reference);
            let example = self.example_at(target, depth + 1, walk);
            walk.visiting.pop();
            return example;
        }

        if let Some(explicit) = explicit_example(schema) {
            return explicit.clone();
        }

        if let Some(parts) = schema.get("allOf").and_then(Value::as_array) {
            return self.merge_all_of(parts, depth, walk);
        }

        for key in ["oneOf", "anyOf"] {
            if let Some(first) = schema.get(key).and_then(Value::as_array).and_then(|a| a.first()) {
                return self.example_at(first, depth + 1, walk);
            }
        }

        match schema_type(schema) {
            Some("object") => self.object_example(schema, depth, walk),
            Some("array") => match schema.get("items") {
                Some(items) => Value::Array(vec![self.example_at(items, depth + 1, walk)]),
                None => Value::Array(Vec::new()),
            },
            Some("null") => Value::Null,
            Some(scalar) => Value::String(placeholder(scalar, format_of(schema))),
            None if schema.get("properties").is_some() => self.object_example(schema, depth, walk),
            None => Value::Null,
        }
    }

    fn object_example(&self, schema: &'a Value, depth: usize, walk: &mut Walk<'a>) -> Value {
        let mut object = Map::new();

        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                if walk.skip_read_only && is_read_only(self.resolve(property)) {
                    continue;
                }
                object.insert(name.clone(), self.example_at(property, depth + 1, walk));
            }
        } else if let Some(additional) = schema
            .get("additionalProperties")
            .filter(|a| a.is_object())
        {
            object.insert(
                "<key>".to_string(),
                self.example_at(additional, depth + 1, walk),
            );
        }

        Value::Object(object)
    }

    fn merge_all_of(&self, parts: &'a [Value], depth: usize, walk: &mut Walk<'a>) -> Value {
        let mut merged = Map::new();
        let mut last_scalar = None;

        for part in parts {
            match self.example_at(part, depth + 1, walk) {
                Value::Object(fields) => merged.extend(fields),
                other => last_scalar = Some(other),
            }
        }

        match last_scalar {
            Some(scalar) if merged.is_empty() => scalar,
            _ => Value::Object(merged),
        }
    }
}

/// State carried through one example walk
struct Walk<'a> {
    /// References currently being expanded
    visiting: Vec<&'a str>,
    skip_read_only: bool,
}

impl Walk<'_> {
    fn new(skip_read_only: bool) -> Self {
        Self {
            visiting: Vec::new(),
            skip_read_only,
        }
    }
}

/// `$ref` target, if `value` is a reference object
pub fn ref_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// `example`, `default` or first `enum` entry, in that order
pub fn explicit_example(schema: &Value) -> Option<&Value> {
    schema
        .get("example")
        .or_else(|| schema.get("default"))
        .or_else(|| schema.get("enum").and_then(Value::as_array).and_then(|e| e.first()))
}

/// Declared type. OpenAPI 3.1 type arrays yield their first non-null entry.
pub fn schema_type(schema: &Value) -> Option<&str> {
    match schema.get("type")? {
        Value::String(kind) => Some(kind.as_str()),
        Value::Array(kinds) => kinds
            .iter()
            .filter_map(Value::as_str)
            .find(|kind| *kind != "null")
            .or(Some("null")),
        _ => None,
    }
}

fn format_of(schema: &Value) -> Option<&str> {
    schema.get("format").and_then(Value::as_str)
}

fn is_read_only(schema: Option<&Value>) -> bool {
    schema
        .and_then(|s| s.get("readOnly"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// `<type>` placeholder for a scalar, refined by format
pub fn placeholder(kind: &str, format: Option<&str>) -> String {
    let label = match (kind, format) {
        ("string", Some("date-time")) => "dateTime",
        ("string", Some("date")) => "date",
        ("string", Some("uuid")) => "uuid",
        ("string", Some("email")) => "email",
        ("string", Some("uri")) => "uri",
        ("string", Some("binary")) => "binary",
        ("string", Some("byte")) => "byte",
        ("integer", Some("int64")) => "long",
        ("number", Some("float")) => "float",
        ("number", Some("double")) => "double",
        (other, _) => other,
    };
    format!("<{}>", label)
}

/// Render an example as a parameter value
pub fn to_parameter_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(to_parameter_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
