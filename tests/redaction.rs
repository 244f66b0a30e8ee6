use serde_json::json;

use waldiez_flow::mapper::model::{export_model, import_model};
use waldiez_flow::mapper::tool::{export_tool, import_tool};
use waldiez_flow::mapper::ExportOptions;
use waldiez_flow::SECRET_PLACEHOLDER;

fn tool_with_secrets() -> waldiez_flow::model::Tool {
    import_tool(&json!({
        "id": "t-1",
        "type": "tool",
        "name": "lookup",
        "data": {
            "toolType": "custom",
            "content": "def lookup():\n    ...\n",
            "secrets": {"API_KEY": "abc", "API_REGION": "eu"}
        }
    }))
}

#[test]
fn hide_secrets_replaces_every_tool_secret() {
    let tool = tool_with_secrets();
    let exported = export_tool(&tool, &ExportOptions::new(true, false));
    let secrets = exported["data"]["secrets"].as_object().unwrap();
    assert_eq!(secrets.len(), 2);
    for value in secrets.values() {
        assert_eq!(value, &json!(SECRET_PLACEHOLDER));
        assert_eq!(value, &json!("REPLACE_ME"));
    }
}

#[test]
fn plain_export_leaves_tool_secrets_unchanged() {
    let tool = tool_with_secrets();
    let exported = export_tool(&tool, &ExportOptions::new(false, false));
    assert_eq!(exported["data"]["secrets"]["API_KEY"], json!("abc"));
    assert_eq!(exported["data"]["secrets"]["API_REGION"], json!("eu"));
}

#[test]
fn hide_secrets_covers_model_credentials() {
    let model = import_model(&json!({
        "id": "m-1",
        "type": "model",
        "name": "bedrock-claude",
        "data": {
            "apiType": "bedrock",
            "apiKey": "sk-live",
            "aws": {
                "region": "us-east-1",
                "accessKey": "AKIA123",
                "secretKey": "very-secret",
                "sessionToken": "tok"
            }
        }
    }));

    let exported = export_model(&model, &ExportOptions::new(true, false));
    assert_eq!(exported["data"]["apiKey"], json!(SECRET_PLACEHOLDER));
    let aws = exported["data"]["aws"].as_object().unwrap();
    for value in aws.values() {
        assert_eq!(value, &json!(SECRET_PLACEHOLDER));
    }

    let plain = export_model(&model, &ExportOptions::new(false, false));
    assert_eq!(plain["data"]["apiKey"], json!("sk-live"));
    assert_eq!(plain["data"]["aws"]["secretKey"], json!("very-secret"));
}
