//! Strict validation against the embedded flow schema. This is a separate
//! path from the lenient importer: the importer never rejects a document,
//! while `doctor`-style tooling uses this to report everything that is
//! off-shape before the importer silently papers over it.

use jsonschema::Draft;
use serde_json::Value;

use crate::error::{FlowError, FlowErrorLocation, Result, SchemaErrorDetail};

pub const EMBEDDED_SCHEMA: &str = include_str!("../schemas/waldiez.flow.schema.json");
const EMBEDDED_SCHEMA_LABEL: &str = "<embedded schema>";

/// Validate a parsed document against the embedded schema, collecting every
/// violation with its JSON pointer.
pub fn validate_flow_json(doc: &Value, source_label: &str) -> Result<()> {
    let schema: Value = serde_json::from_str(EMBEDDED_SCHEMA).map_err(|e| FlowError::Internal {
        message: format!("schema parse for {EMBEDDED_SCHEMA_LABEL}: {e}"),
        location: FlowErrorLocation::at_path(EMBEDDED_SCHEMA_LABEL),
    })?;
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|e| FlowError::Internal {
            message: format!("schema compile for {EMBEDDED_SCHEMA_LABEL}: {e}"),
            location: FlowErrorLocation::at_path(EMBEDDED_SCHEMA_LABEL),
        })?;
    let details: Vec<SchemaErrorDetail> = validator
        .iter_errors(doc)
        .map(|e| {
            let pointer = e.instance_path().to_string();
            let pointer = if pointer.is_empty() {
                "/".to_string()
            } else {
                pointer
            };
            SchemaErrorDetail {
                message: e.to_string(),
                location: FlowErrorLocation::at_path(source_label.to_string())
                    .with_json_pointer(Some(pointer)),
            }
        })
        .collect();
    if !details.is_empty() {
        let message = details
            .iter()
            .map(|detail| {
                let where_str = detail
                    .location
                    .describe()
                    .unwrap_or_else(|| source_label.to_string());
                format!("{where_str}: {}", detail.message)
            })
            .collect::<Vec<_>>()
            .join("\n");
        return Err(FlowError::Schema {
            message,
            details,
            location: FlowErrorLocation::at_path(source_label.to_string()),
        });
    }
    Ok(())
}

/// Parse and strictly validate flow text in one step.
pub fn validate_flow_str(text: &str, source_label: &str) -> Result<Value> {
    let doc: Value = serde_json::from_str(text).map_err(|e| FlowError::Json {
        message: e.to_string(),
        location: FlowErrorLocation::at_path(source_label.to_string()),
    })?;
    validate_flow_json(&doc, source_label)?;
    Ok(doc)
}
