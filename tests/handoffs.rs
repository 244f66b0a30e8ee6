use serde_json::json;

use waldiez_flow::mapper::handoff::{
    get_handoffs, import_condition, import_transition_target, is_valid_condition,
    is_valid_transition_target,
};
use waldiez_flow::model::{HandoffCondition, TransitionTarget};

#[test]
fn agent_target_requires_a_target_string() {
    assert!(!is_valid_transition_target(&json!({"target_type": "AgentTarget"})));
    assert!(!is_valid_transition_target(&json!({"target_type": "AgentTarget", "target": 3})));
    assert!(is_valid_transition_target(
        &json!({"target_type": "AgentTarget", "target": "wa-1"})
    ));
}

#[test]
fn terminate_target_requires_nothing() {
    assert!(is_valid_transition_target(&json!({"target_type": "TerminateTarget"})));
    assert!(is_valid_transition_target(
        &json!({"target_type": "TerminateTarget", "order": 2})
    ));
}

#[test]
fn unknown_target_type_is_rejected() {
    assert!(!is_valid_transition_target(&json!({"target_type": "Bogus"})));
    assert!(!is_valid_transition_target(&json!({})));
    assert!(!is_valid_transition_target(&json!("AgentTarget")));
}

#[test]
fn random_agent_target_needs_a_non_empty_id_list() {
    assert!(is_valid_transition_target(
        &json!({"target_type": "RandomAgentTarget", "target": ["a", "b"]})
    ));
    assert!(!is_valid_transition_target(
        &json!({"target_type": "RandomAgentTarget", "target": []})
    ));
    assert!(!is_valid_transition_target(
        &json!({"target_type": "RandomAgentTarget", "target": "a"})
    ));
}

#[test]
fn every_untargeted_kind_decodes_with_optional_order() {
    for kind in [
        "AskUserTarget",
        "GroupManagerTarget",
        "RevertToUserTarget",
        "StayTarget",
        "TerminateTarget",
    ] {
        let target = import_transition_target(&json!({"target_type": kind, "order": 1}))
            .unwrap_or_else(|| panic!("{kind} should decode"));
        assert_eq!(target.target_type(), kind);
    }
}

#[test]
fn conditions_validate_their_payload_field() {
    assert!(is_valid_condition(
        &json!({"condition_type": "string_llm", "prompt": "go?"})
    ));
    assert!(!is_valid_condition(&json!({"condition_type": "string_llm"})));
    assert!(is_valid_condition(
        &json!({"condition_type": "context_str_llm", "context_str": "{x}"})
    ));
    assert!(is_valid_condition(
        &json!({"condition_type": "string_context", "variable_name": "done"})
    ));
    assert!(is_valid_condition(
        &json!({"condition_type": "expression_context", "expression": "a && b"})
    ));
    assert!(!is_valid_condition(&json!({"condition_type": "always"})));

    assert_eq!(
        import_condition(&json!({"condition_type": "string_context", "variable_name": "done"})),
        Some(HandoffCondition::StringContext { variable_name: "done".into() })
    );
}

#[test]
fn get_handoffs_drops_malformed_entries() {
    let data = json!({
        "handoffs": [
            {
                "target": {"target_type": "AgentTarget", "target": "wa-2"},
                "condition": {"condition_type": "string_llm", "prompt": "escalate?"}
            },
            {"target": {"target_type": "Bogus"}},
            {"condition": {"condition_type": "string_llm", "prompt": "no target"}},
            {
                "target": {"target_type": "StayTarget"},
                "condition": {"condition_type": "string_llm"}
            }
        ]
    });
    let handoffs = get_handoffs(&data);
    assert_eq!(handoffs.len(), 1);
    assert_eq!(
        handoffs[0].target,
        TransitionTarget::Agent { target: "wa-2".into() }
    );
    assert_eq!(
        handoffs[0].condition,
        Some(HandoffCondition::StringLlm { prompt: "escalate?".into() })
    );
}

#[test]
fn handoffs_key_absent_or_malformed_means_none() {
    assert!(get_handoffs(&json!({})).is_empty());
    assert!(get_handoffs(&json!({"handoffs": "nope"})).is_empty());
}
