//! Structural type-guards and conversion for the handoff tagged unions.
//! The guards only accept the nine known `target_type` literals and the
//! four known `condition_type` literals, each with a correctly shaped
//! payload; everything else is rejected and dropped by the callers.

use serde_json::{Map, Value, json};

use crate::mapper::common::{opt_i64, opt_string, string_list};
use crate::model::{Handoff, HandoffAvailability, HandoffCondition, TransitionTarget};

const TARGETED: [&str; 3] = ["AgentTarget", "GroupChatTarget", "NestedChatTarget"];
const UNTARGETED: [&str; 5] = [
    "AskUserTarget",
    "GroupManagerTarget",
    "RevertToUserTarget",
    "StayTarget",
    "TerminateTarget",
];

/// Whether `value` is a well-formed transition target.
pub fn is_valid_transition_target(value: &Value) -> bool {
    import_transition_target(value).is_some()
}

/// Decode a transition target, or `None` when the `target_type` literal is
/// unknown or its required payload field has the wrong shape.
pub fn import_transition_target(value: &Value) -> Option<TransitionTarget> {
    let target_type = value.get("target_type")?.as_str()?;
    if TARGETED.contains(&target_type) {
        let target = value.get("target")?.as_str()?.to_string();
        return Some(match target_type {
            "AgentTarget" => TransitionTarget::Agent { target },
            "GroupChatTarget" => TransitionTarget::GroupChat { target },
            _ => TransitionTarget::NestedChat { target },
        });
    }
    if target_type == "RandomAgentTarget" {
        // The candidate list must be present and non-empty.
        if !value.get("target")?.is_array() {
            return None;
        }
        let targets = string_list(value, "target");
        if targets.is_empty() {
            return None;
        }
        return Some(TransitionTarget::RandomAgent { targets });
    }
    if UNTARGETED.contains(&target_type) {
        let order = opt_i64(value, "order");
        return Some(match target_type {
            "AskUserTarget" => TransitionTarget::AskUser { order },
            "GroupManagerTarget" => TransitionTarget::GroupManager { order },
            "RevertToUserTarget" => TransitionTarget::RevertToUser { order },
            "StayTarget" => TransitionTarget::Stay { order },
            _ => TransitionTarget::Terminate { order },
        });
    }
    None
}

pub fn export_transition_target(target: &TransitionTarget) -> Value {
    let mut obj = Map::new();
    obj.insert("target_type".into(), json!(target.target_type()));
    match target {
        TransitionTarget::Agent { target }
        | TransitionTarget::GroupChat { target }
        | TransitionTarget::NestedChat { target } => {
            obj.insert("target".into(), json!(target));
        }
        TransitionTarget::RandomAgent { targets } => {
            obj.insert("target".into(), json!(targets));
        }
        TransitionTarget::AskUser { order }
        | TransitionTarget::GroupManager { order }
        | TransitionTarget::RevertToUser { order }
        | TransitionTarget::Stay { order }
        | TransitionTarget::Terminate { order } => {
            if let Some(order) = order {
                obj.insert("order".into(), json!(order));
            }
        }
    }
    Value::Object(obj)
}

/// Whether `value` is a well-formed handoff condition.
pub fn is_valid_condition(value: &Value) -> bool {
    import_condition(value).is_some()
}

/// Decode a condition, or `None` when the `condition_type` literal is
/// unknown or its required payload field is not a string.
pub fn import_condition(value: &Value) -> Option<HandoffCondition> {
    let condition_type = value.get("condition_type")?.as_str()?;
    match condition_type {
        "string_llm" => Some(HandoffCondition::StringLlm {
            prompt: value.get("prompt")?.as_str()?.to_string(),
        }),
        "context_str_llm" => Some(HandoffCondition::ContextStrLlm {
            context_str: value.get("context_str")?.as_str()?.to_string(),
        }),
        "string_context" => Some(HandoffCondition::StringContext {
            variable_name: value.get("variable_name")?.as_str()?.to_string(),
        }),
        "expression_context" => Some(HandoffCondition::ExpressionContext {
            expression: value.get("expression")?.as_str()?.to_string(),
        }),
        _ => None,
    }
}

pub fn export_condition(condition: &HandoffCondition) -> Value {
    match condition {
        HandoffCondition::StringLlm { prompt } => json!({
            "condition_type": condition.condition_type(),
            "prompt": prompt,
        }),
        HandoffCondition::ContextStrLlm { context_str } => json!({
            "condition_type": condition.condition_type(),
            "context_str": context_str,
        }),
        HandoffCondition::StringContext { variable_name } => json!({
            "condition_type": condition.condition_type(),
            "variable_name": variable_name,
        }),
        HandoffCondition::ExpressionContext { expression } => json!({
            "condition_type": condition.condition_type(),
            "expression": expression,
        }),
    }
}

/// Decode an availability gate; malformed input degrades to `None`
/// (always available) rather than dropping the owner.
pub fn import_availability(value: Option<&Value>) -> HandoffAvailability {
    let Some(value) = value else {
        return HandoffAvailability::None;
    };
    let kind = value.get("type").and_then(Value::as_str).unwrap_or("none");
    let payload = opt_string(value, "value").unwrap_or_default();
    match kind {
        "string" => HandoffAvailability::Variable(payload),
        "expression" => HandoffAvailability::Expression(payload),
        _ => HandoffAvailability::None,
    }
}

pub fn export_availability(available: &HandoffAvailability) -> Value {
    match available {
        HandoffAvailability::None => json!({ "type": "none", "value": "" }),
        HandoffAvailability::Variable(value) => json!({ "type": "string", "value": value }),
        HandoffAvailability::Expression(value) => json!({ "type": "expression", "value": value }),
    }
}

/// Extract an agent's handoff list. Entries whose target is missing or
/// malformed, or whose condition is present but malformed, are dropped.
pub fn get_handoffs(data: &Value) -> Vec<Handoff> {
    let Some(items) = data.get("handoffs").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let target = import_transition_target(item.get("target")?)?;
            let condition = match item.get("condition") {
                Some(raw) => Some(import_condition(raw)?),
                None => None,
            };
            Some(Handoff {
                target,
                condition,
                available: import_availability(item.get("available")),
            })
        })
        .collect()
}

pub fn export_handoff(handoff: &Handoff) -> Value {
    let mut obj = Map::new();
    obj.insert("target".into(), export_transition_target(&handoff.target));
    if let Some(condition) = &handoff.condition {
        obj.insert("condition".into(), export_condition(condition));
    }
    obj.insert("available".into(), export_availability(&handoff.available));
    Value::Object(obj)
}
