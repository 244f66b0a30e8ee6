//! Lenient field extraction. Every helper here degrades to a safe default
//! on type mismatch instead of erroring; this is the resilience contract
//! that lets partial or hand-edited documents import without crashing.

use indexmap::IndexMap;
use serde_json::Value;

use crate::graph::{FALLBACK_POSITION, Position, Viewport};
use crate::model::EntityMeta;
use crate::util::{is_timestamp, new_id, now_timestamp};

/// The entity's `id` string, or a freshly generated one.
pub fn get_id(obj: &Value) -> String {
    match obj.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => new_id(),
    }
}

pub fn string_or(obj: &Value, key: &str, fallback: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

pub fn opt_string(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// String array; absent/malformed becomes empty, non-string members are
/// dropped individually.
pub fn string_list(obj: &Value, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub fn bool_or(obj: &Value, key: &str, fallback: bool) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(fallback)
}

pub fn opt_bool(obj: &Value, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

pub fn opt_f64(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

pub fn opt_u64(obj: &Value, key: &str) -> Option<u64> {
    obj.get(key).and_then(Value::as_u64)
}

pub fn opt_i64(obj: &Value, key: &str) -> Option<i64> {
    obj.get(key).and_then(Value::as_i64)
}

/// Clone the entries of an object-valued key; anything else is empty.
pub fn object_entries(obj: &Value, key: &str) -> IndexMap<String, Value> {
    obj.get(key)
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// String-to-string map; non-string values are dropped individually.
pub fn string_map(obj: &Value, key: &str) -> IndexMap<String, String> {
    obj.get(key)
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// RFC 3339 timestamp, or "now" when absent or unparseable.
pub fn timestamp_or_now(obj: &Value, key: &str) -> String {
    match obj.get(key).and_then(Value::as_str) {
        Some(value) if is_timestamp(value) => value.to_string(),
        _ => now_timestamp(),
    }
}

/// Every top-level key not in `exclude`, preserved verbatim.
pub fn rest_without(obj: &Value, exclude: &[&str]) -> IndexMap<String, Value> {
    obj.as_object()
        .map(|map| {
            map.iter()
                .filter(|(k, _)| !exclude.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Shared entity header: id, name, description, tags, requirements,
/// timestamps, and the rest bag of everything in `exclude`'s complement.
pub fn get_meta(
    obj: &Value,
    fallback_name: &str,
    fallback_description: &str,
    exclude: &[&str],
) -> EntityMeta {
    EntityMeta {
        id: get_id(obj),
        name: string_or(obj, "name", fallback_name),
        description: string_or(obj, "description", fallback_description),
        tags: string_list(obj, "tags"),
        requirements: string_list(obj, "requirements"),
        created_at: timestamp_or_now(obj, "createdAt"),
        updated_at: timestamp_or_now(obj, "updatedAt"),
        rest: rest_without(obj, exclude),
    }
}

/// A `{x, y}` pair of numbers; anything else gets the fallback placement.
pub fn position_from(value: Option<&Value>) -> Position {
    let Some(value) = value else {
        return FALLBACK_POSITION;
    };
    match (
        value.get("x").and_then(Value::as_f64),
        value.get("y").and_then(Value::as_f64),
    ) {
        (Some(x), Some(y)) => Position { x, y },
        _ => FALLBACK_POSITION,
    }
}

/// A `{x, y, zoom}` viewport; malformed input resets to origin, zoom 1.
pub fn viewport_from(value: Option<&Value>) -> Viewport {
    let Some(value) = value else {
        return Viewport::default();
    };
    match (
        value.get("x").and_then(Value::as_f64),
        value.get("y").and_then(Value::as_f64),
        value.get("zoom").and_then(Value::as_f64),
    ) {
        (Some(x), Some(y), Some(zoom)) => Viewport { x, y, zoom },
        _ => Viewport::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_is_generated_when_missing_or_not_a_string() {
        assert!(get_id(&json!({})).starts_with("wf-"));
        assert!(get_id(&json!({"id": 42})).starts_with("wf-"));
        assert_eq!(get_id(&json!({"id": "wa-1"})), "wa-1");
    }

    #[test]
    fn string_list_drops_non_string_members() {
        let obj = json!({"tags": ["a", 1, null, "b"]});
        assert_eq!(string_list(&obj, "tags"), vec!["a", "b"]);
        assert!(string_list(&json!({"tags": "nope"}), "tags").is_empty());
    }

    #[test]
    fn timestamps_fall_back_to_now() {
        let kept = timestamp_or_now(&json!({"createdAt": "2024-01-02T03:04:05Z"}), "createdAt");
        assert_eq!(kept, "2024-01-02T03:04:05Z");
        let replaced = timestamp_or_now(&json!({"createdAt": "yesterday"}), "createdAt");
        assert!(is_timestamp(&replaced));
    }

    #[test]
    fn rest_keeps_unknown_keys_verbatim() {
        let obj = json!({"id": "x", "custom": {"a": 1}, "other": 2});
        let rest = rest_without(&obj, &["id"]);
        assert_eq!(rest.get("custom"), Some(&json!({"a": 1})));
        assert_eq!(rest.get("other"), Some(&json!(2)));
        assert!(!rest.contains_key("id"));
    }

    #[test]
    fn malformed_position_gets_fallback() {
        assert_eq!(position_from(None), FALLBACK_POSITION);
        assert_eq!(position_from(Some(&json!({"x": "a", "y": 2}))), FALLBACK_POSITION);
        let ok = position_from(Some(&json!({"x": 1.5, "y": 2})));
        assert_eq!((ok.x, ok.y), (1.5, 2.0));
    }

    #[test]
    fn malformed_viewport_resets() {
        assert_eq!(viewport_from(Some(&json!({"zoom": "big"}))), Viewport::default());
        let ok = viewport_from(Some(&json!({"x": 1.0, "y": 2.0, "zoom": 0.5})));
        assert_eq!(ok.zoom, 0.5);
    }
}
