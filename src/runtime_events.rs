//! Passive dispatch over the JSON event stream an external workflow
//! runtime emits while executing a flow. Each handler claims one message
//! type and normalizes its payload; a malformed payload yields an explicit
//! error-result carrying the original data, never a panic or an `Err` the
//! caller is forced to unwind through.

use serde_json::Value;

use crate::mapper::common::{opt_f64, opt_string};

/// A normalized runtime event.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    Print {
        content: String,
    },
    InputRequest {
        request_id: String,
        prompt: String,
        password: bool,
    },
    RunCompletion {
        summary: Option<String>,
        history: Vec<Value>,
        cost: Option<f64>,
    },
    Debug {
        kind: String,
        payload: Value,
    },
}

/// Validation failure for one runtime message; carries the original data
/// so the consumer can decide whether to surface it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventError {
    pub message: String,
    pub original_data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutcome {
    Event(RuntimeEvent),
    Error(EventError),
}

fn event_error(message: impl Into<String>, data: &Value) -> HandlerOutcome {
    HandlerOutcome::Error(EventError {
        message: message.into(),
        original_data: data.clone(),
    })
}

/// One message-type handler: claims a type, normalizes its payload.
pub trait MessageHandler {
    fn can_handle(&self, message_type: &str) -> bool;
    fn handle(&self, data: &Value) -> Option<HandlerOutcome>;
}

pub struct PrintHandler;

impl MessageHandler for PrintHandler {
    fn can_handle(&self, message_type: &str) -> bool {
        message_type == "print"
    }

    fn handle(&self, data: &Value) -> Option<HandlerOutcome> {
        // Both `{data: "..."}` and `{content: "..."}` shapes occur.
        let content = opt_string(data, "data").or_else(|| opt_string(data, "content"));
        Some(match content {
            Some(content) => HandlerOutcome::Event(RuntimeEvent::Print { content }),
            None => event_error("print message without string content", data),
        })
    }
}

pub struct InputRequestHandler;

impl MessageHandler for InputRequestHandler {
    fn can_handle(&self, message_type: &str) -> bool {
        message_type == "input_request"
    }

    fn handle(&self, data: &Value) -> Option<HandlerOutcome> {
        let Some(request_id) = opt_string(data, "request_id") else {
            return Some(event_error("input request without request_id", data));
        };
        Some(HandlerOutcome::Event(RuntimeEvent::InputRequest {
            request_id,
            prompt: opt_string(data, "prompt").unwrap_or_else(|| "> ".to_string()),
            password: data
                .get("password")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }))
    }
}

pub struct RunCompletionHandler;

impl MessageHandler for RunCompletionHandler {
    fn can_handle(&self, message_type: &str) -> bool {
        message_type == "run_completion"
    }

    fn handle(&self, data: &Value) -> Option<HandlerOutcome> {
        Some(HandlerOutcome::Event(RuntimeEvent::RunCompletion {
            summary: opt_string(data, "summary"),
            history: data
                .get("history")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            cost: opt_f64(data, "cost"),
        }))
    }
}

pub struct DebugHandler;

impl MessageHandler for DebugHandler {
    fn can_handle(&self, message_type: &str) -> bool {
        message_type == "debug"
    }

    fn handle(&self, data: &Value) -> Option<HandlerOutcome> {
        let Some(kind) = opt_string(data, "kind") else {
            return Some(event_error("debug message without kind", data));
        };
        Some(HandlerOutcome::Event(RuntimeEvent::Debug {
            kind,
            payload: data.get("payload").cloned().unwrap_or(Value::Null),
        }))
    }
}

pub fn default_handlers() -> Vec<Box<dyn MessageHandler>> {
    vec![
        Box::new(PrintHandler),
        Box::new(InputRequestHandler),
        Box::new(RunCompletionHandler),
        Box::new(DebugHandler),
    ]
}

/// Route one raw runtime message to the first handler that claims its
/// `type`. Unknown types return `None` so the caller can ignore them.
pub fn dispatch(handlers: &[Box<dyn MessageHandler>], message: &Value) -> Option<HandlerOutcome> {
    let message_type = message.get("type").and_then(Value::as_str)?;
    let data = message.get("data").unwrap_or(message);
    handlers
        .iter()
        .find(|handler| handler.can_handle(message_type))
        .and_then(|handler| handler.handle(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn handlers_claim_exactly_their_type() {
        assert!(PrintHandler.can_handle("print"));
        assert!(!PrintHandler.can_handle("input_request"));
        assert!(InputRequestHandler.can_handle("input_request"));
        assert!(!DebugHandler.can_handle("run_completion"));
    }

    #[test]
    fn print_normalizes_either_content_shape() {
        let outcome = dispatch(&default_handlers(), &json!({"type": "print", "data": {"data": "hi"}}));
        assert_eq!(
            outcome,
            Some(HandlerOutcome::Event(RuntimeEvent::Print {
                content: "hi".into()
            }))
        );
    }

    #[test]
    fn malformed_payload_becomes_error_result() {
        let message = json!({"type": "input_request", "data": {"prompt": 3}});
        let Some(HandlerOutcome::Error(err)) = dispatch(&default_handlers(), &message) else {
            panic!("expected error outcome");
        };
        assert!(err.message.contains("request_id"));
        assert_eq!(err.original_data, json!({"prompt": 3}));
    }

    #[test]
    fn unknown_type_is_ignored() {
        assert_eq!(dispatch(&default_handlers(), &json!({"type": "telemetry"})), None);
        assert_eq!(dispatch(&default_handlers(), &json!({"no_type": true})), None);
    }
}
