//! Per-entity and flow-level mappers between the untyped `.waldiez` JSON
//! document format and the typed object graph. Import is total: malformed
//! pieces are defaulted or dropped, never surfaced as errors. Export is the
//! structural inverse, with optional secret redaction.

pub mod agent;
pub mod chat;
pub mod common;
pub mod flow;
pub mod handoff;
pub mod model;
pub mod tool;

use serde_json::{Map, Value};

use crate::model::EntityMeta;

/// Sentinel written over secret values when exporting with `hide_secrets`.
pub const SECRET_PLACEHOLDER: &str = "REPLACE_ME";

/// Knobs for the export direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Replace every string value in secrets/credentials maps with
    /// [`SECRET_PLACEHOLDER`].
    pub hide_secrets: bool,
    /// Strip host-storage linkage so the document is standalone.
    pub skip_links: bool,
}

impl ExportOptions {
    pub fn new(hide_secrets: bool, skip_links: bool) -> Self {
        ExportOptions {
            hide_secrets,
            skip_links,
        }
    }
}

/// Shared entity header in document order, with the rest bag re-applied.
/// Known keys win over rest-bag leftovers of the same name.
pub(crate) fn meta_json(meta: &EntityMeta, type_literal: &str) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("id".into(), Value::String(meta.id.clone()));
    out.insert("type".into(), Value::String(type_literal.to_string()));
    out.insert("name".into(), Value::String(meta.name.clone()));
    out.insert(
        "description".into(),
        Value::String(meta.description.clone()),
    );
    out.insert("tags".into(), serde_json::json!(meta.tags));
    out.insert("requirements".into(), serde_json::json!(meta.requirements));
    out.insert("createdAt".into(), Value::String(meta.created_at.clone()));
    out.insert("updatedAt".into(), Value::String(meta.updated_at.clone()));
    for (key, value) in &meta.rest {
        if !out.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}
