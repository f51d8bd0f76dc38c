//! Lenient field extraction from raw content maps.
//!
//! Missing or mistyped optional fields never fail a page build: they default
//! to `""`, `None` or an empty collection.

use crate::content::{Metadata, ModelName};
use serde_json::{Map, Value};

/// Non-empty string field.
pub fn opt_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// String field or `""`.
pub fn text(fields: &Map<String, Value>, key: &str) -> String {
    opt_text(fields, key).unwrap_or_default()
}

/// Any non-null value.
pub fn value(fields: &Map<String, Value>, key: &str) -> Option<Value> {
    fields.get(key).filter(|v| !v.is_null()).cloned()
}

/// Remove a non-empty string field.
pub fn take_opt_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Remove a string field, defaulting to `""`.
pub fn take_text(fields: &mut Map<String, Value>, key: &str) -> String {
    take_opt_text(fields, key).unwrap_or_default()
}

/// Remove a non-null value.
pub fn take_value(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.remove(key).filter(|v| !v.is_null())
}

/// Remove an array field; anything else becomes an empty list.
pub fn take_array(fields: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match fields.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Remove keys that would collide with typed props fields.
pub fn strip_keys(fields: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        fields.remove(*key);
    }
}

/// Remove and parse an embedded `__metadata` block.
///
/// Missing parts are filled in: the model falls back to `model`, the id to
/// `fallback_id()`. Unknown metadata keys are kept.
pub fn take_metadata(
    fields: &mut Map<String, Value>,
    model: &str,
    fallback_id: impl FnOnce() -> String,
) -> Metadata {
    let mut raw = match fields.remove("__metadata") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let model_name = take_opt_text(&mut raw, "modelName").map_or_else(|| ModelName::from(model), ModelName::from);
    let id = take_opt_text(&mut raw, "id").unwrap_or_else(fallback_id);
    let url_path = take_opt_text(&mut raw, "urlPath");

    Metadata {
        model_name,
        id,
        url_path,
        extra: raw,
    }
}

/// Deterministic id for objects that arrive without one.
///
/// Hashes the given parts, so the same content always yields the same id
/// and distinct positions yield distinct ids.
pub fn derive_id(prefix: &str, parts: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(&[0]);
    }
    let hash = hasher.finalize();
    format!("{prefix}-{}", hex::encode(&hash.as_bytes()[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_lenient_defaults() {
        let fields = map(json!({"title": "", "count": 3, "tags": null}));
        assert_eq!(text(&fields, "title"), "");
        assert_eq!(text(&fields, "count"), "");
        assert_eq!(opt_text(&fields, "missing"), None);
        assert_eq!(value(&fields, "tags"), None);
        assert_eq!(value(&fields, "count"), Some(json!(3)));
    }

    #[test]
    fn test_take_helpers_remove_keys() {
        let mut fields = map(json!({"title": "T", "items": [1, 2], "other": "x"}));
        assert_eq!(take_text(&mut fields, "title"), "T");
        assert_eq!(take_array(&mut fields, "items"), vec![json!(1), json!(2)]);
        assert_eq!(take_array(&mut fields, "other"), Vec::<Value>::new());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_take_metadata_fills_missing_parts() {
        let mut fields = map(json!({"__metadata": {"relSourcePath": "x.md"}}));
        let meta = take_metadata(&mut fields, "TextSection", || "section-1".into());
        assert_eq!(meta.model_name, ModelName::from("TextSection"));
        assert_eq!(meta.id, "section-1");
        assert!(meta.extra.contains_key("relSourcePath"));
        assert!(!fields.contains_key("__metadata"));

        let mut fields = map(json!({"__metadata": {"modelName": "HeroSection", "id": "hero"}}));
        let meta = take_metadata(&mut fields, "TextSection", || unreachable!());
        assert_eq!(meta.model_name, ModelName::from("HeroSection"));
        assert_eq!(meta.id, "hero");
    }

    #[test]
    fn test_derive_id_is_deterministic_and_position_sensitive() {
        let a = derive_id("section", &["/", "0", "HeroSection"]);
        let b = derive_id("section", &["/", "0", "HeroSection"]);
        let c = derive_id("section", &["/", "1", "HeroSection"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("section-"));
        assert_eq!(a.len(), "section-".len() + 16);
    }
}
