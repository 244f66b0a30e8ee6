//! Flow-level import/export: iterates declared nodes and edges, dispatches
//! to the per-entity mappers by discriminant, reconciles node membership
//! with the typed entity lists, prunes dangling references, and reassembles
//! the graph-shaped output.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value, json};
use tracing::warn;

use crate::graph::{GraphEdge, GraphNode, GraphView, NodeType};
use crate::mapper::agent::{agent_as_node, export_agent, import_agent};
use crate::mapper::chat::{chat_as_edge, export_chat, import_chat};
use crate::mapper::common::{
    bool_or, get_meta, opt_i64, opt_string, position_from, rest_without, viewport_from,
};
use crate::mapper::model::{export_model, import_model, model_as_node};
use crate::mapper::tool::{export_tool, import_tool, tool_as_node};
use crate::mapper::{ExportOptions, meta_json};
use crate::model::{Agent, AgentBuckets, Flow, FlowData, TransitionTarget};

const FLOW_META_KEYS: [&str; 10] = [
    "id",
    "type",
    "storageId",
    "name",
    "description",
    "tags",
    "requirements",
    "createdAt",
    "updatedAt",
    "data",
];

const DATA_KEYS: [&str; 9] = [
    "nodes",
    "edges",
    "agents",
    "models",
    "tools",
    "chats",
    "isAsync",
    "cacheSeed",
    "viewport",
];

const NODE_KEYS: [&str; 5] = ["id", "type", "position", "parentId", "data"];

const BUCKET_KEYS: [&str; 7] = [
    "userProxies",
    "assistants",
    "groupManagers",
    "docAgents",
    "captains",
    "reasoningAgents",
    "remoteAgents",
];

/// Extract the declared node list. Nodes with a missing/non-string id or an
/// unknown `type` discriminant are skipped; a malformed position defaults
/// to the fallback placement instead of rejecting the node.
pub fn get_nodes(data: &Value) -> Vec<GraphNode> {
    let Some(items) = data.get("nodes").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let id = item.get("id")?.as_str()?.to_string();
            let node_type = NodeType::parse(item.get("type")?.as_str()?)?;
            let mut node = GraphNode::new(id, node_type, position_from(item.get("position")));
            node.parent_id = item
                .get("parentId")
                .and_then(Value::as_str)
                .map(str::to_string);
            if let Some(data) = item.get("data").filter(|d| d.is_object()) {
                node.data = data.clone();
            }
            node.rest = rest_without(item, &NODE_KEYS);
            Some(node)
        })
        .collect()
}

/// Import the declared agent buckets, keeping only agents that also appear
/// as an agent node: node-list membership is the source of truth for
/// whether an entity exists in the graph.
pub fn get_agents(agents: Option<&Value>, nodes: &[GraphNode]) -> AgentBuckets {
    let agent_node_ids: HashSet<&str> = nodes
        .iter()
        .filter(|node| node.node_type == NodeType::Agent)
        .map(|node| node.id.as_str())
        .collect();
    let mut buckets = AgentBuckets::default();
    let Some(agents) = agents.filter(|a| a.is_object()) else {
        return buckets;
    };
    for key in BUCKET_KEYS {
        let Some(items) = agents.get(key).and_then(Value::as_array) else {
            continue;
        };
        let imported: Vec<Agent> = items
            .iter()
            .filter(|item| {
                item.get("id")
                    .and_then(Value::as_str)
                    .is_some_and(|id| agent_node_ids.contains(id))
            })
            .map(import_agent)
            .collect();
        match key {
            "userProxies" => buckets.user_proxies = imported,
            "assistants" => buckets.assistants = imported,
            "groupManagers" => buckets.group_managers = imported,
            "docAgents" => buckets.doc_agents = imported,
            "captains" => buckets.captains = imported,
            "reasoningAgents" => buckets.reasoning_agents = imported,
            _ => buckets.remote_agents = imported,
        }
    }
    buckets
}

fn entities_of<'a>(
    data: &'a Value,
    key: &str,
    nodes: &[GraphNode],
    node_type: NodeType,
) -> Vec<&'a Value> {
    let wanted: HashSet<&str> = nodes
        .iter()
        .filter(|node| node.node_type == node_type)
        .map(|node| node.id.as_str())
        .collect();
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| {
                    item.get("id")
                        .and_then(Value::as_str)
                        .is_some_and(|id| wanted.contains(id))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Import one `.waldiez` document. Never fails: malformed pieces are
/// defaulted or dropped, and the worst case is an empty flow.
pub fn import_flow(value: &Value) -> Flow {
    let meta = get_meta(
        value,
        Flow::DEFAULT_NAME,
        Flow::DEFAULT_DESCRIPTION,
        &FLOW_META_KEYS,
    );
    let storage_id = opt_string(value, "storageId").unwrap_or_else(|| meta.id.clone());

    let empty = json!({});
    let data = value.get("data").filter(|d| d.is_object()).unwrap_or(&empty);

    let mut nodes = get_nodes(data);
    let models: Vec<_> = entities_of(data, "models", &nodes, NodeType::Model)
        .into_iter()
        .map(import_model)
        .collect();
    let tools: Vec<_> = entities_of(data, "tools", &nodes, NodeType::Tool)
        .into_iter()
        .map(import_tool)
        .collect();
    let mut agents = get_agents(data.get("agents"), &nodes);

    // Node presence pruned the entity lists above; now drop layout nodes
    // that have no surviving entity behind them.
    let model_ids: HashSet<String> = models.iter().map(|m| m.meta.id.clone()).collect();
    let tool_ids: HashSet<String> = tools.iter().map(|t| t.meta.id.clone()).collect();
    let agent_ids: HashSet<String> = agents.iter().map(|a| a.meta.id.clone()).collect();
    nodes.retain(|node| match node.node_type {
        NodeType::Agent => agent_ids.contains(&node.id),
        NodeType::Model => model_ids.contains(&node.id),
        NodeType::Tool => tool_ids.contains(&node.id),
    });

    let chat_records: HashMap<&str, &Value> = data
        .get("chats")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| Some((item.get("id")?.as_str()?, item)))
                .collect()
        })
        .unwrap_or_default();

    let mut chats = Vec::new();
    let mut edges = Vec::new();
    if let Some(items) = data.get("edges").and_then(Value::as_array) {
        for (index, item) in items.iter().enumerate() {
            let record = item
                .get("id")
                .and_then(Value::as_str)
                .and_then(|id| chat_records.get(id).copied());
            match import_chat(item, record, index) {
                Ok((chat, edge)) => {
                    if agent_ids.contains(&chat.source) && agent_ids.contains(&chat.target) {
                        chats.push(chat);
                        edges.push(edge);
                    }
                }
                Err(err) => warn!("skipping chat entry {index}: {err}"),
            }
        }
    }

    let chat_ids: HashSet<String> = chats.iter().map(|c| c.id.clone()).collect();
    for chat in &mut chats {
        chat.prerequisites.retain(|id| chat_ids.contains(id));
    }
    for agent in agents.iter_mut() {
        prune_agent_links(agent, &agent_ids, &model_ids, &tool_ids, &chat_ids);
    }

    Flow {
        meta,
        storage_id,
        data: FlowData {
            nodes,
            edges,
            agents,
            models,
            tools,
            chats,
            is_async: bool_or(data, "isAsync", false),
            cache_seed: opt_i64(data, "cacheSeed"),
            viewport: viewport_from(data.get("viewport")),
            rest: rest_without(data, &DATA_KEYS),
        },
    }
}

fn target_resolves(
    target: &TransitionTarget,
    agent_ids: &HashSet<String>,
    chat_ids: &HashSet<String>,
) -> bool {
    match target {
        TransitionTarget::Agent { target } | TransitionTarget::GroupChat { target } => {
            agent_ids.contains(target)
        }
        TransitionTarget::RandomAgent { targets } => {
            targets.iter().any(|id| agent_ids.contains(id))
        }
        TransitionTarget::NestedChat { target } => chat_ids.contains(target),
        TransitionTarget::AskUser { .. }
        | TransitionTarget::GroupManager { .. }
        | TransitionTarget::RevertToUser { .. }
        | TransitionTarget::Stay { .. }
        | TransitionTarget::Terminate { .. } => true,
    }
}

fn prune_agent_links(
    agent: &mut Agent,
    agent_ids: &HashSet<String>,
    model_ids: &HashSet<String>,
    tool_ids: &HashSet<String>,
    chat_ids: &HashSet<String>,
) {
    let common = &mut agent.common;
    common.model_ids.retain(|id| model_ids.contains(id));
    common.tool_ids.retain(|id| tool_ids.contains(id));
    if let crate::model::agent::CodeExecution::Enabled(config) = &mut common.code_execution {
        config.functions.retain(|id| tool_ids.contains(id));
    }
    for nested in &mut common.nested_chats {
        nested.triggered_by.retain(|id| chat_ids.contains(id));
        nested.messages.retain(|m| chat_ids.contains(&m.id));
    }
    common.handoffs.retain_mut(|handoff| {
        if let TransitionTarget::RandomAgent { targets } = &mut handoff.target {
            targets.retain(|id| agent_ids.contains(id));
        }
        target_resolves(&handoff.target, agent_ids, chat_ids)
    });
    if let Some(after_work) = &common.after_work
        && !target_resolves(after_work, agent_ids, chat_ids)
    {
        common.after_work = None;
    }
}

/// Serialize a flow back to the plain `.waldiez` document.
pub fn export_flow(flow: &Flow, opts: &ExportOptions) -> Value {
    // Stored layout nodes keep their declared order; entities that have no
    // stored node get one synthesized from their rest-bag position.
    let mut nodes: Vec<Value> = Vec::new();
    let mut placed: HashSet<&str> = HashSet::new();
    for node in &flow.data.nodes {
        nodes.push(serde_json::to_value(node).unwrap_or_else(|_| json!({})));
        placed.insert(node.id.as_str());
    }
    for agent in flow.data.agents.iter() {
        if !placed.contains(agent.meta.id.as_str()) {
            nodes.push(
                serde_json::to_value(agent_as_node(agent, None)).unwrap_or_else(|_| json!({})),
            );
        }
    }
    for model in &flow.data.models {
        if !placed.contains(model.meta.id.as_str()) {
            nodes.push(
                serde_json::to_value(model_as_node(model, None)).unwrap_or_else(|_| json!({})),
            );
        }
    }
    for tool in &flow.data.tools {
        if !placed.contains(tool.meta.id.as_str()) {
            nodes.push(
                serde_json::to_value(tool_as_node(tool, None)).unwrap_or_else(|_| json!({})),
            );
        }
    }

    let mut agents = Map::new();
    for (key, bucket) in [
        ("userProxies", &flow.data.agents.user_proxies),
        ("assistants", &flow.data.agents.assistants),
        ("groupManagers", &flow.data.agents.group_managers),
        ("docAgents", &flow.data.agents.doc_agents),
        ("captains", &flow.data.agents.captains),
        ("reasoningAgents", &flow.data.agents.reasoning_agents),
        ("remoteAgents", &flow.data.agents.remote_agents),
    ] {
        let exported: Vec<Value> = bucket.iter().map(|a| export_agent(a, opts)).collect();
        agents.insert(key.into(), Value::Array(exported));
    }

    let edges_by_id: HashMap<&str, &GraphEdge> = flow
        .data
        .edges
        .iter()
        .map(|edge| (edge.id.as_str(), edge))
        .collect();
    let mut edges: Vec<Value> = Vec::new();
    let mut chats: Vec<Value> = Vec::new();
    for chat in &flow.data.chats {
        let edge = edges_by_id
            .get(chat.id.as_str())
            .map(|edge| (*edge).clone())
            .unwrap_or_else(|| chat_as_edge(chat));
        edges.push(serde_json::to_value(&edge).unwrap_or_else(|_| json!({})));
        chats.push(export_chat(chat, opts));
    }

    let mut data = Map::new();
    data.insert("nodes".into(), Value::Array(nodes));
    data.insert("edges".into(), Value::Array(edges));
    data.insert("agents".into(), Value::Object(agents));
    data.insert(
        "models".into(),
        Value::Array(flow.data.models.iter().map(|m| export_model(m, opts)).collect()),
    );
    data.insert(
        "tools".into(),
        Value::Array(flow.data.tools.iter().map(|t| export_tool(t, opts)).collect()),
    );
    data.insert("chats".into(), Value::Array(chats));
    data.insert("isAsync".into(), json!(flow.data.is_async));
    if let Some(cache_seed) = flow.data.cache_seed {
        data.insert("cacheSeed".into(), json!(cache_seed));
    }
    data.insert("viewport".into(), serde_json::to_value(flow.data.viewport).unwrap_or_default());
    for (key, value) in &flow.data.rest {
        if !data.contains_key(key) {
            data.insert(key.clone(), value.clone());
        }
    }

    let mut out = meta_json(&flow.meta, "flow");
    let storage_id = if opts.skip_links {
        flow.meta.id.clone()
    } else {
        flow.storage_id.clone()
    };
    out.insert("storageId".into(), Value::String(storage_id));
    out.insert("data".into(), Value::Object(data));
    Value::Object(out)
}

/// Graph-shaped projection for a presentation layer: layout nodes with the
/// owning entity's exported configuration attached.
pub fn to_graph(flow: &Flow) -> GraphView {
    let opts = ExportOptions::default();
    let data_of = |id: &str, node_type: NodeType| -> Value {
        let exported = match node_type {
            NodeType::Agent => flow
                .data
                .agents
                .iter()
                .find(|a| a.meta.id == id)
                .map(|a| export_agent(a, &opts)),
            NodeType::Model => flow
                .data
                .models
                .iter()
                .find(|m| m.meta.id == id)
                .map(|m| export_model(m, &opts)),
            NodeType::Tool => flow
                .data
                .tools
                .iter()
                .find(|t| t.meta.id == id)
                .map(|t| export_tool(t, &opts)),
        };
        exported
            .and_then(|mut entity| entity.get_mut("data").map(Value::take))
            .unwrap_or_else(|| json!({}))
    };

    let nodes = flow
        .data
        .nodes
        .iter()
        .map(|node| {
            let mut out = node.clone();
            out.data = data_of(&node.id, node.node_type);
            out
        })
        .collect();

    let edges = flow
        .data
        .chats
        .iter()
        .map(|chat| {
            let mut edge = flow
                .data
                .edges
                .iter()
                .find(|edge| edge.id == chat.id)
                .cloned()
                .unwrap_or_else(|| chat_as_edge(chat));
            edge.data = export_chat(chat, &opts)
                .get_mut("data")
                .map(Value::take)
                .unwrap_or_else(|| json!({}));
            edge
        })
        .collect();

    GraphView {
        nodes,
        edges,
        viewport: flow.data.viewport,
    }
}
