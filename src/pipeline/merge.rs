//! Preserve the remote collection's display name

use serde_json::{Map, Value};

/// Set `info.name` on a collection document, creating `info` when absent.
///
/// Documents that are not JSON objects are left untouched.
pub fn merge_name(collection: &mut Value, name: &str) {
    let Some(document) = collection.as_object_mut() else {
        return;
    };

    let info = document
        .entry("info")
        .or_insert_with(|| Value::Object(Map::new()));
    if !info.is_object() {
        *info = Value::Object(Map::new());
    }

    if let Some(info) = info.as_object_mut() {
        info.insert("name".to_string(), Value::String(name.to_string()));
    }
}
