use serde_json::json;

use waldiez_flow::mapper::flow::import_flow;
use waldiez_flow::model::SummaryMethod;

fn two_agents_data(edges: serde_json::Value, chats: serde_json::Value) -> serde_json::Value {
    json!({
        "data": {
            "nodes": [
                {"id": "a-1", "type": "agent", "position": {"x": 0.0, "y": 0.0}},
                {"id": "a-2", "type": "agent", "position": {"x": 10.0, "y": 0.0}}
            ],
            "agents": {
                "userProxies": [
                    {"id": "a-1", "type": "agent", "agentType": "user_proxy", "name": "u"}
                ],
                "assistants": [
                    {"id": "a-2", "type": "agent", "agentType": "assistant", "name": "a"}
                ]
            },
            "edges": edges,
            "chats": chats
        }
    })
}

#[test]
fn one_malformed_chat_does_not_abort_the_rest() {
    let doc = two_agents_data(
        json!([
            {"id": "c-1", "type": "chat", "source": "a-1"},
            {"id": "c-2", "type": "chat", "source": "a-1", "target": "a-2"},
            {"id": "c-3", "type": "teleport", "source": "a-1", "target": "a-2"}
        ]),
        json!([]),
    );
    let flow = import_flow(&doc);
    assert_eq!(flow.data.chats.len(), 1);
    assert_eq!(flow.data.chats[0].id, "c-2");
    assert_eq!(flow.data.edges.len(), 1);
}

#[test]
fn chats_with_dangling_endpoints_are_dropped() {
    let doc = two_agents_data(
        json!([
            {"id": "c-1", "type": "chat", "source": "a-1", "target": "ghost"},
            {"id": "c-2", "type": "chat", "source": "a-2", "target": "a-1"}
        ]),
        json!([]),
    );
    let flow = import_flow(&doc);
    assert_eq!(flow.data.chats.len(), 1);
    assert_eq!(flow.data.chats[0].id, "c-2");
}

#[test]
fn chat_records_enrich_their_edges() {
    let doc = two_agents_data(
        json!([
            {"id": "c-1", "type": "chat", "source": "a-1", "target": "a-2"}
        ]),
        json!([
            {
                "id": "c-1",
                "source": "a-1",
                "target": "a-2",
                "data": {
                    "message": {"type": "string", "content": "hi"},
                    "summary": {"method": "reflection_with_llm", "prompt": "sum up"},
                    "order": 3
                }
            }
        ]),
    );
    let flow = import_flow(&doc);
    let chat = &flow.data.chats[0];
    assert_eq!(chat.message.content.as_deref(), Some("hi"));
    // snake_case spelling is accepted and normalized
    assert_eq!(chat.summary.method, SummaryMethod::ReflectionWithLlm);
    assert_eq!(chat.summary.method.as_str(), "reflectionWithLlm");
    assert_eq!(chat.order, 3);
}

#[test]
fn missing_chat_record_defaults_everything() {
    let doc = two_agents_data(
        json!([
            {"id": "c-9", "type": "nested", "source": "a-1", "target": "a-2"}
        ]),
        json!([]),
    );
    let flow = import_flow(&doc);
    let chat = &flow.data.chats[0];
    assert_eq!(chat.order, -1);
    assert_eq!(chat.position, 0);
    assert!(chat.message.content.is_none());
    assert_eq!(chat.summary.method, SummaryMethod::None);
    assert!(chat.condition.is_none());
}

#[test]
fn prerequisites_are_pruned_to_existing_chats() {
    let doc = two_agents_data(
        json!([
            {"id": "c-1", "type": "chat", "source": "a-1", "target": "a-2"},
            {"id": "c-2", "type": "chat", "source": "a-2", "target": "a-1"}
        ]),
        json!([
            {
                "id": "c-2",
                "data": {"prerequisites": ["c-1", "c-gone"]}
            }
        ]),
    );
    let flow = import_flow(&doc);
    assert_eq!(flow.data.chats[1].prerequisites, vec!["c-1"]);
}
