//! Schema, loader, and import/export mappers for Waldiez flow documents:
//! the `.waldiez` JSON format a visual node-editor uses to describe
//! multi-agent conversational workflows (agents, models, tools, chat edges,
//! handoffs).
//!
//! The import direction is deliberately lenient: malformed or partial
//! documents are defaulted and pruned, never rejected, so a host
//! application can always open what it is given. The strict side lives in
//! [`schema_validate`] and the `waldiez-flow` CLI's `doctor` command.
#![forbid(unsafe_code)]

pub mod error;
pub mod graph;
pub mod json_output;
pub mod mapper;
pub mod model;
pub mod runtime_events;
pub mod schema_validate;
pub mod util;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{FlowError, FlowErrorLocation, Result};
pub use crate::mapper::flow::{export_flow, import_flow, to_graph};
pub use crate::mapper::{ExportOptions, SECRET_PLACEHOLDER};
pub use crate::model::Flow;

const INLINE_SOURCE_LABEL: &str = "<inline>";

/// Parse flow text and leniently import it. The only error here is text
/// that is not JSON at all; a valid-JSON document always imports.
pub fn load_flow_from_str(text: &str) -> Result<Flow> {
    load_flow_with_source(text, INLINE_SOURCE_LABEL)
}

/// Same as [`load_flow_from_str`] but lets callers label the source for
/// diagnostics.
pub fn load_flow_with_source(text: &str, source_label: impl Into<String>) -> Result<Flow> {
    let source_label = source_label.into();
    let doc: Value = serde_json::from_str(text).map_err(|e| FlowError::Json {
        message: e.to_string(),
        location: FlowErrorLocation::at_path(source_label),
    })?;
    Ok(import_flow(&doc))
}

/// Read and leniently import a flow file.
pub fn load_flow_from_path(path: &Path) -> Result<Flow> {
    let content = fs::read_to_string(path).map_err(|e| FlowError::Internal {
        message: format!("failed to read {}: {e}", path.display()),
        location: FlowErrorLocation::at_path(path.display().to_string())
            .with_source_path(Some(path)),
    })?;
    load_flow_with_source(&content, path.display().to_string())
}
