use serde_json::json;

use waldiez_flow::mapper::flow::{import_flow, to_graph};
use waldiez_flow::{load_flow_from_str, load_flow_with_source};

fn fixture() -> serde_json::Value {
    serde_json::from_str(include_str!("data/simple_flow.json")).expect("fixture parses")
}

#[test]
fn projection_attaches_entity_data_to_layout_nodes() {
    let flow = import_flow(&fixture());
    let view = to_graph(&flow);

    assert_eq!(view.nodes.len(), 5);
    assert_eq!(view.edges.len(), 2);
    assert_eq!(view.viewport.zoom, 1.0);

    let model_node = view.nodes.iter().find(|n| n.id == "model-gpt").unwrap();
    assert_eq!(model_node.data["apiType"], json!("openai"));
    assert_eq!(model_node.position.y, 300.0);

    let assistant_node = view.nodes.iter().find(|n| n.id == "agent-assistant").unwrap();
    assert_eq!(assistant_node.data["humanInputMode"], json!("NEVER"));

    let edge = view.edges.iter().find(|e| e.id == "chat-2").unwrap();
    assert!(edge.hidden);
    assert_eq!(edge.data["summary"]["method"], json!("reflectionWithLlm"));
}

#[test]
fn load_from_str_only_fails_on_non_json() {
    let flow = load_flow_from_str("{}").expect("valid JSON always imports");
    assert_eq!(flow.meta.name, "Waldiez Flow");

    let err = load_flow_with_source("{not json", "broken.waldiez").unwrap_err();
    assert!(err.to_string().contains("broken.waldiez"));
}
