use indexmap::IndexMap;
use serde_json::Value;

use crate::model::handoff::{Handoff, TransitionTarget};

/// When the human operator is asked for input during a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HumanInputMode {
    Always,
    #[default]
    Never,
    Terminate,
}

impl HumanInputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumanInputMode::Always => "ALWAYS",
            HumanInputMode::Never => "NEVER",
            HumanInputMode::Terminate => "TERMINATE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ALWAYS" => Some(HumanInputMode::Always),
            "NEVER" => Some(HumanInputMode::Never),
            "TERMINATE" => Some(HumanInputMode::Terminate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminationType {
    #[default]
    None,
    Keyword,
    Method,
}

impl TerminationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationType::None => "none",
            TerminationType::Keyword => "keyword",
            TerminationType::Method => "method",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(TerminationType::None),
            "keyword" => Some(TerminationType::Keyword),
            "method" => Some(TerminationType::Method),
            _ => None,
        }
    }
}

/// How keyword termination matches against a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminationCriterion {
    #[default]
    Found,
    Ending,
    Exact,
}

impl TerminationCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationCriterion::Found => "found",
            TerminationCriterion::Ending => "ending",
            TerminationCriterion::Exact => "exact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "found" => Some(TerminationCriterion::Found),
            "ending" => Some(TerminationCriterion::Ending),
            "exact" => Some(TerminationCriterion::Exact),
            _ => None,
        }
    }
}

/// When an agent considers the conversation finished.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Termination {
    pub termination_type: TerminationType,
    pub keywords: Vec<String>,
    pub criterion: TerminationCriterion,
    pub method_content: Option<String>,
}

/// Sandbox settings for agent-executed code. `Off` round-trips as the
/// literal `false` in documents.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CodeExecution {
    #[default]
    Off,
    Enabled(CodeExecutionConfig),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeExecutionConfig {
    pub work_dir: Option<String>,
    pub use_docker: Option<bool>,
    pub timeout: Option<u64>,
    pub last_n_messages: Option<u64>,
    /// Tool ids exposed as callable functions inside the sandbox.
    pub functions: Vec<String>,
}

/// Reference to a chat queued as a nested conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedChatRef {
    pub id: String,
    pub is_reply: bool,
}

/// Nested-chat wiring: which chats trigger the queue and which run in it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedChat {
    pub triggered_by: Vec<String>,
    pub messages: Vec<NestedChatRef>,
}

/// Behavior configuration shared by every agent variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgentCommon {
    pub system_message: Option<String>,
    pub human_input_mode: HumanInputMode,
    pub max_consecutive_auto_reply: Option<u64>,
    pub termination: Termination,
    pub code_execution: CodeExecution,
    pub model_ids: Vec<String>,
    pub tool_ids: Vec<String>,
    pub nested_chats: Vec<NestedChat>,
    pub handoffs: Vec<Handoff>,
    pub after_work: Option<TransitionTarget>,
    pub context_variables: IndexMap<String, Value>,
}
