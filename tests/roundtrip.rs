use pretty_assertions::assert_eq;
use serde_json::json;

use waldiez_flow::mapper::agent::{export_agent, import_agent};
use waldiez_flow::mapper::flow::{export_flow, import_flow};
use waldiez_flow::mapper::model::{export_model, import_model};
use waldiez_flow::mapper::tool::{export_tool, import_tool};
use waldiez_flow::mapper::ExportOptions;

fn fixture() -> serde_json::Value {
    serde_json::from_str(include_str!("data/simple_flow.json")).expect("fixture parses")
}

#[test]
fn flow_roundtrip_is_a_fixed_point() {
    let opts = ExportOptions::default();
    let first = import_flow(&fixture());
    let exported = export_flow(&first, &opts);
    let second = import_flow(&exported);
    assert_eq!(first, second);

    // and once more, through the already-normalized document
    let third = import_flow(&export_flow(&second, &opts));
    assert_eq!(second, third);
}

#[test]
fn model_import_is_idempotent_over_its_own_export() {
    let opts = ExportOptions::default();
    let raw = json!({
        "id": "m-1",
        "type": "model",
        "name": "claude",
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T10:00:00.000Z",
        "data": {
            "apiType": "anthropic",
            "apiKey": "sk-ant",
            "maxTokens": 4096,
            "aws": {"region": "eu-west-1", "accessKey": "AKIA"},
            "extras": {"stop": ["\n"]}
        }
    });
    let first = import_model(&raw);
    let second = import_model(&export_model(&first, &opts));
    assert_eq!(first, second);
}

#[test]
fn tool_import_is_idempotent_over_its_own_export() {
    let opts = ExportOptions::default();
    let raw = json!({
        "id": "t-1",
        "type": "tool",
        "name": "lookup",
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T10:00:00.000Z",
        "data": {
            "toolType": "langchain",
            "content": "# wrapper",
            "secrets": {"TOKEN": "t"}
        }
    });
    let first = import_tool(&raw);
    let second = import_tool(&export_tool(&first, &opts));
    assert_eq!(first, second);
}

#[test]
fn agent_import_is_idempotent_over_its_own_export() {
    let opts = ExportOptions::default();
    let raw = json!({
        "id": "a-1",
        "type": "agent",
        "agentType": "reasoning",
        "name": "thinker",
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T10:00:00.000Z",
        "data": {
            "systemMessage": "Think first.",
            "humanInputMode": "NEVER",
            "codeExecutionConfig": {"workDir": "wd", "functions": []},
            "verbose": true,
            "reasonConfig": {"method": "mcts", "maxDepth": 4, "nsim": 8},
            "handoffs": [
                {
                    "target": {"target_type": "RandomAgentTarget", "target": ["a-2", "a-3"]},
                    "condition": {"condition_type": "expression_context", "expression": "depth > 2"},
                    "available": {"type": "string", "value": "ready"}
                }
            ]
        }
    });
    let first = import_agent(&raw);
    let second = import_agent(&export_agent(&first, &opts));
    assert_eq!(first, second);
}

#[test]
fn missing_tool_content_gets_the_type_template() {
    let raw = json!({
        "id": "t-2",
        "type": "tool",
        "name": "summarize",
        "data": {"toolType": "custom"}
    });
    let tool = import_tool(&raw);
    assert!(tool.content.contains("def summarize()"));
}

#[test]
fn exported_document_keeps_unknown_keys() {
    let first = import_flow(&fixture());
    let exported = export_flow(&first, &ExportOptions::default());
    assert_eq!(exported.get("origin"), Some(&json!({"editor": "unit-test"})));
    let edge = &exported["data"]["edges"][0];
    assert_eq!(edge.get("animated"), Some(&json!(false)));
}
