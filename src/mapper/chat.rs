use serde_json::{Map, Value, json};

use crate::error::{FlowError, FlowErrorLocation, Result};
use crate::graph::{EdgeType, GraphEdge};
use crate::mapper::common::{
    object_entries, opt_i64, opt_string, opt_u64, rest_without, string_list, string_or,
};
use crate::mapper::handoff::{export_availability, export_condition, import_availability, import_condition};
use crate::mapper::ExportOptions;
use crate::model::chat::{Chat, ChatMessage, ChatSummary, MessageType, NestedChatMessages, SummaryMethod};

const EDGE_KEYS: [&str; 6] = ["id", "type", "source", "target", "hidden", "data"];
const CHAT_KEYS: [&str; 4] = ["id", "source", "target", "data"];

fn invalid(index: usize, message: impl Into<String>) -> FlowError {
    FlowError::InvalidChat {
        index,
        message: message.into(),
        location: FlowErrorLocation::at_path(format!("data.edges[{index}]")),
    }
}

/// Decode one edge together with its semantic chat record. Unlike the rest
/// of the importer this can fail: an edge whose `id`, `type`, `source`, or
/// `target` is not a well-typed string cannot be wired into the graph at
/// all. Callers log the error and continue with the remaining entries.
pub fn import_chat(
    edge: &Value,
    chat_record: Option<&Value>,
    index: usize,
) -> Result<(Chat, GraphEdge)> {
    let id = edge
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(index, "missing or non-string id"))?
        .to_string();
    let type_literal = edge
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(index, "missing or non-string type"))?;
    let edge_type = EdgeType::parse(type_literal)
        .ok_or_else(|| invalid(index, format!("unknown edge type '{type_literal}'")))?;
    let source = edge
        .get("source")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(index, "missing or non-string source"))?
        .to_string();
    let target = edge
        .get("target")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(index, "missing or non-string target"))?
        .to_string();

    let empty = json!({});
    let record = chat_record.unwrap_or(&empty);
    let data = record.get("data").filter(|d| d.is_object()).unwrap_or(&empty);

    let chat = Chat {
        id: id.clone(),
        chat_type: edge_type,
        source: source.clone(),
        target: target.clone(),
        name: opt_string(data, "name"),
        description: opt_string(data, "description"),
        message: import_message(data.get("message")),
        summary: import_summary(data.get("summary")),
        nested_chat: import_nested_messages(data.get("nestedChat")),
        order: opt_i64(data, "order").unwrap_or(-1),
        position: opt_u64(data, "position").unwrap_or(index as u64),
        max_turns: opt_u64(data, "maxTurns"),
        prerequisites: string_list(data, "prerequisites"),
        condition: data.get("condition").and_then(import_condition),
        available: import_availability(data.get("available")),
        rest: rest_without(record, &CHAT_KEYS),
    };

    let graph_edge = GraphEdge {
        id,
        edge_type,
        source,
        target,
        hidden: edge_type == EdgeType::Hidden,
        data: Value::Object(Default::default()),
        rest: rest_without(edge, &EDGE_KEYS),
    };

    Ok((chat, graph_edge))
}

fn import_message(value: Option<&Value>) -> ChatMessage {
    let Some(value) = value else {
        return ChatMessage::default();
    };
    ChatMessage {
        message_type: value
            .get("type")
            .and_then(Value::as_str)
            .and_then(MessageType::parse)
            .unwrap_or_default(),
        content: opt_string(value, "content"),
        context: object_entries(value, "context"),
        use_carryover: value
            .get("useCarryover")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn import_summary(value: Option<&Value>) -> ChatSummary {
    let Some(value) = value else {
        return ChatSummary::default();
    };
    ChatSummary {
        method: value
            .get("method")
            .and_then(Value::as_str)
            .and_then(SummaryMethod::parse)
            .unwrap_or_default(),
        prompt: string_or(value, "prompt", ""),
        args: object_entries(value, "args"),
    }
}

fn import_nested_messages(value: Option<&Value>) -> Option<NestedChatMessages> {
    let value = value.filter(|v| v.is_object())?;
    let message = value
        .get("message")
        .filter(|v| v.is_object())
        .map(|v| import_message(Some(v)));
    let reply = value
        .get("reply")
        .filter(|v| v.is_object())
        .map(|v| import_message(Some(v)));
    if message.is_none() && reply.is_none() {
        return None;
    }
    Some(NestedChatMessages { message, reply })
}

fn export_message(message: &ChatMessage) -> Value {
    json!({
        "type": message.message_type.as_str(),
        "content": message.content,
        "context": message.context,
        "useCarryover": message.use_carryover,
    })
}

/// Serialize the semantic chat record for the document's `chats` list.
pub fn export_chat(chat: &Chat, _opts: &ExportOptions) -> Value {
    let mut data = Map::new();
    if let Some(name) = &chat.name {
        data.insert("name".into(), json!(name));
    }
    if let Some(description) = &chat.description {
        data.insert("description".into(), json!(description));
    }
    data.insert("message".into(), export_message(&chat.message));
    data.insert(
        "summary".into(),
        json!({
            "method": chat.summary.method.as_str(),
            "prompt": chat.summary.prompt,
            "args": chat.summary.args,
        }),
    );
    if let Some(nested) = &chat.nested_chat {
        let mut out = Map::new();
        if let Some(message) = &nested.message {
            out.insert("message".into(), export_message(message));
        }
        if let Some(reply) = &nested.reply {
            out.insert("reply".into(), export_message(reply));
        }
        data.insert("nestedChat".into(), Value::Object(out));
    }
    data.insert("order".into(), json!(chat.order));
    data.insert("position".into(), json!(chat.position));
    if let Some(max_turns) = chat.max_turns {
        data.insert("maxTurns".into(), json!(max_turns));
    }
    data.insert("prerequisites".into(), json!(chat.prerequisites));
    if let Some(condition) = &chat.condition {
        data.insert("condition".into(), export_condition(condition));
    }
    data.insert("available".into(), export_availability(&chat.available));

    let mut out = Map::new();
    out.insert("id".into(), json!(chat.id));
    out.insert("source".into(), json!(chat.source));
    out.insert("target".into(), json!(chat.target));
    out.insert("data".into(), Value::Object(data));
    for (key, value) in &chat.rest {
        if !out.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
    Value::Object(out)
}

/// Synthesize a graph edge from a chat that has no stored edge record.
pub fn chat_as_edge(chat: &Chat) -> GraphEdge {
    GraphEdge {
        id: chat.id.clone(),
        edge_type: chat.chat_type,
        source: chat.source.clone(),
        target: chat.target.clone(),
        hidden: chat.chat_type == EdgeType::Hidden,
        data: Value::Object(Default::default()),
        rest: Default::default(),
    }
}
