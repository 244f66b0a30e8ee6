//! Tagged unions describing where a conversational turn goes next and under
//! what condition. The nine target kinds and four condition kinds are closed
//! sets; every consumption site matches exhaustively.

/// Where control passes after an agent's turn.
///
/// `Agent`, `GroupChat`, and `NestedChat` carry a single target id,
/// `RandomAgent` carries a candidate id list, and the remaining kinds carry
/// no target at all, only an optional ordering hint.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionTarget {
    Agent { target: String },
    RandomAgent { targets: Vec<String> },
    GroupChat { target: String },
    NestedChat { target: String },
    AskUser { order: Option<i64> },
    GroupManager { order: Option<i64> },
    RevertToUser { order: Option<i64> },
    Stay { order: Option<i64> },
    Terminate { order: Option<i64> },
}

impl TransitionTarget {
    /// The `target_type` literal used in flow documents.
    pub fn target_type(&self) -> &'static str {
        match self {
            TransitionTarget::Agent { .. } => "AgentTarget",
            TransitionTarget::RandomAgent { .. } => "RandomAgentTarget",
            TransitionTarget::GroupChat { .. } => "GroupChatTarget",
            TransitionTarget::NestedChat { .. } => "NestedChatTarget",
            TransitionTarget::AskUser { .. } => "AskUserTarget",
            TransitionTarget::GroupManager { .. } => "GroupManagerTarget",
            TransitionTarget::RevertToUser { .. } => "RevertToUserTarget",
            TransitionTarget::Stay { .. } => "StayTarget",
            TransitionTarget::Terminate { .. } => "TerminateTarget",
        }
    }
}

/// Under what condition a handoff fires: judged by an LLM or checked
/// against the conversation's context variables.
#[derive(Debug, Clone, PartialEq)]
pub enum HandoffCondition {
    StringLlm { prompt: String },
    ContextStrLlm { context_str: String },
    StringContext { variable_name: String },
    ExpressionContext { expression: String },
}

impl HandoffCondition {
    /// The `condition_type` literal used in flow documents.
    pub fn condition_type(&self) -> &'static str {
        match self {
            HandoffCondition::StringLlm { .. } => "string_llm",
            HandoffCondition::ContextStrLlm { .. } => "context_str_llm",
            HandoffCondition::StringContext { .. } => "string_context",
            HandoffCondition::ExpressionContext { .. } => "expression_context",
        }
    }
}

/// Whether a handoff is currently offered at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HandoffAvailability {
    #[default]
    None,
    Variable(String),
    Expression(String),
}

impl HandoffAvailability {
    pub fn availability_type(&self) -> &'static str {
        match self {
            HandoffAvailability::None => "none",
            HandoffAvailability::Variable(_) => "string",
            HandoffAvailability::Expression(_) => "expression",
        }
    }
}

/// One handoff an agent offers: a target, an optional firing condition,
/// and an availability gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub target: TransitionTarget,
    pub condition: Option<HandoffCondition>,
    pub available: HandoffAvailability,
}
