use indexmap::IndexMap;
use serde_json::Value;

use crate::graph::EdgeType;
use crate::model::handoff::{HandoffAvailability, HandoffCondition};

/// How the opening message of a chat is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    None,
    String,
    Method,
    RagMessageGenerator,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::None => "none",
            MessageType::String => "string",
            MessageType::Method => "method",
            MessageType::RagMessageGenerator => "rag_message_generator",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(MessageType::None),
            "string" => Some(MessageType::String),
            "method" => Some(MessageType::Method),
            "rag_message_generator" => Some(MessageType::RagMessageGenerator),
            _ => None,
        }
    }
}

/// Message payload carried by a chat edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatMessage {
    pub message_type: MessageType,
    pub content: Option<String>,
    pub context: IndexMap<String, Value>,
    pub use_carryover: bool,
}

/// How a finished chat is condensed into a summary for the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryMethod {
    #[default]
    None,
    ReflectionWithLlm,
    LastMsg,
}

impl SummaryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryMethod::None => "none",
            SummaryMethod::ReflectionWithLlm => "reflectionWithLlm",
            SummaryMethod::LastMsg => "lastMsg",
        }
    }

    /// Both the camelCase and snake_case spellings of the reflection method
    /// appear in documents in the wild; accept either.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(SummaryMethod::None),
            "reflectionWithLlm" | "reflection_with_llm" => Some(SummaryMethod::ReflectionWithLlm),
            "lastMsg" | "last_msg" => Some(SummaryMethod::LastMsg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatSummary {
    pub method: SummaryMethod,
    pub prompt: String,
    pub args: IndexMap<String, Value>,
}

/// Message/reply pair used when this chat is queued as a nested chat.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedChatMessages {
    pub message: Option<ChatMessage>,
    pub reply: Option<ChatMessage>,
}

/// One directed conversational connection between two agents.
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: String,
    pub chat_type: EdgeType,
    pub source: String,
    pub target: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub message: ChatMessage,
    pub summary: ChatSummary,
    pub nested_chat: Option<NestedChatMessages>,
    /// Execution order among queued chats; negative means unordered.
    pub order: i64,
    /// Stable position of this chat within the document's chat list.
    pub position: u64,
    pub max_turns: Option<u64>,
    /// Chat ids that must complete before this one starts (async flows).
    pub prerequisites: Vec<String>,
    pub condition: Option<HandoffCondition>,
    pub available: HandoffAvailability,
    pub rest: IndexMap<String, Value>,
}

impl Chat {
    pub fn new(
        id: impl Into<String>,
        chat_type: EdgeType,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Chat {
            id: id.into(),
            chat_type,
            source: source.into(),
            target: target.into(),
            name: None,
            description: None,
            message: ChatMessage::default(),
            summary: ChatSummary::default(),
            nested_chat: None,
            order: -1,
            position: 0,
            max_turns: None,
            prerequisites: Vec::new(),
            condition: None,
            available: HandoffAvailability::default(),
            rest: IndexMap::new(),
        }
    }
}
