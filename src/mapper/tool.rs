use serde_json::{Map, Value, json};

use crate::graph::{GraphNode, NodeType, Position};
use crate::mapper::common::{get_meta, position_from, string_map};
use crate::mapper::{ExportOptions, SECRET_PLACEHOLDER, meta_json};
use crate::model::{Tool, ToolType};

const META_KEYS: [&str; 9] = [
    "id",
    "type",
    "name",
    "description",
    "tags",
    "requirements",
    "createdAt",
    "updatedAt",
    "data",
];

/// Decode one tool entity; an unrecognized `toolType` falls back to
/// `custom`, and missing content gets the type's starter template.
pub fn import_tool(value: &Value) -> Tool {
    let meta = get_meta(value, Tool::DEFAULT_NAME, Tool::DEFAULT_DESCRIPTION, &META_KEYS);
    let empty = json!({});
    let data = value.get("data").filter(|d| d.is_object()).unwrap_or(&empty);

    let tool_type = data
        .get("toolType")
        .and_then(Value::as_str)
        .and_then(ToolType::parse)
        .unwrap_or_default();
    let content = match data.get("content").and_then(Value::as_str) {
        Some(content) => content.to_string(),
        None => tool_type.default_content(&meta.name),
    };

    Tool {
        meta,
        tool_type,
        content,
        secrets: string_map(data, "secrets"),
    }
}

pub fn export_tool(tool: &Tool, opts: &ExportOptions) -> Value {
    let mut secrets = Map::new();
    for (key, value) in &tool.secrets {
        let exported = if opts.hide_secrets {
            SECRET_PLACEHOLDER.to_string()
        } else {
            value.clone()
        };
        secrets.insert(key.clone(), Value::String(exported));
    }

    let mut data = Map::new();
    data.insert("toolType".into(), json!(tool.tool_type.as_str()));
    data.insert("content".into(), json!(tool.content));
    data.insert("secrets".into(), Value::Object(secrets));

    let mut out = meta_json(&tool.meta, "tool");
    out.insert("data".into(), Value::Object(data));
    Value::Object(out)
}

pub fn tool_as_node(tool: &Tool, position: Option<Position>) -> GraphNode {
    let position = position.unwrap_or_else(|| position_from(tool.meta.rest.get("position")));
    let mut node = GraphNode::new(tool.meta.id.clone(), NodeType::Tool, position);
    node.parent_id = tool
        .meta
        .rest
        .get("parentId")
        .and_then(Value::as_str)
        .map(str::to_string);
    node
}
