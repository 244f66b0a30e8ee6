use pretty_assertions::assert_eq;
use serde_json::json;

use waldiez_flow::graph::{EdgeType, FALLBACK_POSITION, NodeType};
use waldiez_flow::mapper::flow::{get_agents, get_nodes, import_flow};
use waldiez_flow::model::{AgentData, Flow, HandoffCondition, TransitionTarget};

fn fixture() -> serde_json::Value {
    serde_json::from_str(include_str!("data/simple_flow.json")).expect("fixture parses")
}

#[test]
fn empty_document_imports_with_defaults() {
    let flow = import_flow(&json!({}));
    assert_eq!(flow.meta.name, Flow::DEFAULT_NAME);
    assert_eq!(flow.meta.name, "Waldiez Flow");
    assert_eq!(flow.meta.description, "A waldiez flow");
    assert!(flow.data.nodes.is_empty());
    assert!(flow.data.edges.is_empty());
    assert!(flow.data.agents.is_empty());
    assert!(flow.data.models.is_empty());
    assert!(flow.data.tools.is_empty());
    assert!(flow.data.chats.is_empty());
    assert_eq!(flow.data.viewport.zoom, 1.0);
    assert!(!flow.data.is_async);
    // storageId falls back to the generated flow id
    assert_eq!(flow.storage_id, flow.meta.id);
}

#[test]
fn non_object_documents_do_not_panic() {
    for doc in [json!(null), json!([]), json!("flow"), json!(42)] {
        let flow = import_flow(&doc);
        assert_eq!(flow.meta.name, "Waldiez Flow");
        assert!(flow.data.nodes.is_empty());
    }
}

#[test]
fn invalid_node_type_is_omitted_and_bad_position_falls_back() {
    let nodes = get_nodes(&json!({
        "nodes": [
            {"id": "1", "type": "invalid", "position": {"x": 1.0, "y": 2.0}},
            {"id": "2", "type": "agent", "position": {"x": "left", "y": 2.0}},
            {"id": "3", "type": "model", "position": {"x": 5.0, "y": 6.0}},
            {"type": "agent", "position": {"x": 1.0, "y": 1.0}}
        ]
    }));
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id, "2");
    assert_eq!(nodes[0].position, FALLBACK_POSITION);
    assert_eq!((nodes[0].position.x, nodes[0].position.y), (20.0, 20.0));
    assert_eq!(nodes[1].id, "3");
    assert_eq!(nodes[1].node_type, NodeType::Model);
}

#[test]
fn declared_agents_without_nodes_are_dropped() {
    let agents = get_agents(
        Some(&json!({
            "assistants": [
                {"id": "wa-2", "type": "agent", "agentType": "assistant", "name": "A"}
            ]
        })),
        &[],
    );
    assert!(agents.assistants.is_empty());
}

#[test]
fn malformed_viewport_resets_to_defaults() {
    let flow = import_flow(&json!({"data": {"viewport": {"zoom": "big"}}}));
    assert_eq!(flow.data.viewport.x, 0.0);
    assert_eq!(flow.data.viewport.y, 0.0);
    assert_eq!(flow.data.viewport.zoom, 1.0);
}

#[test]
fn fixture_imports_every_entity() {
    let flow = import_flow(&fixture());
    assert_eq!(flow.meta.id, "wf-1");
    assert_eq!(flow.storage_id, "storage-1");
    assert_eq!(flow.meta.name, "Support triage");
    assert_eq!(flow.meta.rest.get("origin"), Some(&json!({"editor": "unit-test"})));

    assert_eq!(flow.data.nodes.len(), 5);
    assert_eq!(flow.data.models.len(), 1);
    assert_eq!(flow.data.tools.len(), 1);
    assert_eq!(flow.data.agents.user_proxies.len(), 1);
    assert_eq!(flow.data.agents.assistants.len(), 1);
    assert_eq!(flow.data.agents.group_managers.len(), 1);
    assert_eq!(flow.data.chats.len(), 2);
    assert_eq!(flow.data.cache_seed, Some(42));

    let assistant = &flow.data.agents.assistants[0];
    assert!(matches!(assistant.data, AgentData::Assistant { multimodal: false }));
    // dangling model link pruned, existing one kept
    assert_eq!(assistant.common.model_ids, vec!["model-gpt"]);
    assert_eq!(assistant.common.tool_ids, vec!["tool-search"]);
    // the malformed handoff is dropped, the valid one survives
    assert_eq!(assistant.common.handoffs.len(), 1);
    assert_eq!(
        assistant.common.handoffs[0].target,
        TransitionTarget::Agent { target: "agent-manager".into() }
    );
    assert_eq!(
        assistant.common.after_work,
        Some(TransitionTarget::Terminate { order: None })
    );

    let escalate = &flow.data.chats[1];
    assert_eq!(escalate.chat_type, EdgeType::Hidden);
    assert_eq!(escalate.prerequisites, vec!["chat-1"]);
    assert_eq!(
        escalate.condition,
        Some(HandoffCondition::StringContext { variable_name: "escalate".into() })
    );
    assert!(flow.data.edges[1].hidden);
    assert!(!flow.data.edges[0].hidden);
    assert_eq!(flow.data.edges[0].rest.get("animated"), Some(&json!(false)));
}

#[test]
fn unknown_agent_type_falls_back_and_keeps_its_literal() {
    let flow = import_flow(&json!({
        "data": {
            "nodes": [
                {"id": "a-1", "type": "agent", "position": {"x": 0.0, "y": 0.0}}
            ],
            "agents": {
                "assistants": [
                    {"id": "a-1", "type": "agent", "agentType": "wizard", "name": "W"}
                ]
            }
        }
    }));
    assert_eq!(flow.data.agents.assistants.len(), 1);
    let agent = &flow.data.agents.assistants[0];
    assert_eq!(
        agent.data,
        AgentData::Other { agent_type: "wizard".into() }
    );
    assert_eq!(agent.data.agent_type(), "wizard");
}

#[test]
fn layout_nodes_without_entities_are_pruned() {
    let flow = import_flow(&json!({
        "data": {
            "nodes": [
                {"id": "m-1", "type": "model", "position": {"x": 0.0, "y": 0.0}},
                {"id": "m-2", "type": "model", "position": {"x": 1.0, "y": 1.0}}
            ],
            "models": [
                {"id": "m-1", "type": "model", "name": "kept"}
            ]
        }
    }));
    assert_eq!(flow.data.models.len(), 1);
    assert_eq!(flow.data.nodes.len(), 1);
    assert_eq!(flow.data.nodes[0].id, "m-1");
}
