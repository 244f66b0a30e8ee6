//! Agent value objects. The variant-specific payload doubles as the
//! `agentType` discriminant, so matching on [`AgentData`] is exhaustive over
//! every variant the format knows about, with `Other` as the total-dispatch
//! fallback for unknown literals.

pub mod captain;
pub mod common;
pub mod doc_agent;
pub mod group_manager;
pub mod reasoning;
pub mod remote;

pub use captain::CaptainData;
pub use common::{
    AgentCommon, CodeExecution, CodeExecutionConfig, HumanInputMode, NestedChat, NestedChatRef,
    Termination, TerminationCriterion, TerminationType,
};
pub use doc_agent::{DocAgentData, QueryEngine};
pub use group_manager::{
    GroupManagerData, SpeakerSelection, SpeakerSelectionMethod, TransitionsType,
};
pub use reasoning::{ReasonConfig, ReasonMethod, ReasoningData};
pub use remote::RemoteData;

use crate::model::common::EntityMeta;

/// Variant-specific agent payload; also the `agentType` discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentData {
    UserProxy,
    Assistant { multimodal: bool },
    GroupManager(GroupManagerData),
    DocAgent(DocAgentData),
    Captain(CaptainData),
    Reasoning(ReasoningData),
    Remote(RemoteData),
    /// Unknown `agentType` literal, preserved for round-tripping.
    Other { agent_type: String },
}

impl AgentData {
    /// The `agentType` literal used in flow documents.
    pub fn agent_type(&self) -> &str {
        match self {
            AgentData::UserProxy => "user_proxy",
            AgentData::Assistant { .. } => "assistant",
            AgentData::GroupManager(_) => "group_manager",
            AgentData::DocAgent(_) => "doc_agent",
            AgentData::Captain(_) => "captain",
            AgentData::Reasoning(_) => "reasoning",
            AgentData::Remote(_) => "remote",
            AgentData::Other { agent_type } => agent_type,
        }
    }

    /// Default display name for a freshly created agent of this variant.
    pub fn default_name(&self) -> &'static str {
        match self {
            AgentData::UserProxy => "User Proxy",
            AgentData::Assistant { .. } => "Assistant",
            AgentData::GroupManager(_) => "Group Manager",
            AgentData::DocAgent(_) => "Doc Agent",
            AgentData::Captain(_) => "Captain",
            AgentData::Reasoning(_) => "Reasoning Agent",
            AgentData::Remote(_) => "Remote Agent",
            AgentData::Other { .. } => "Agent",
        }
    }
}

/// One participant in the conversation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub meta: EntityMeta,
    pub common: AgentCommon,
    pub data: AgentData,
}

impl Agent {
    pub const DEFAULT_DESCRIPTION: &'static str = "A new agent";

    pub fn new(data: AgentData) -> Self {
        let name = data.default_name();
        Agent {
            meta: EntityMeta::new(name, Self::DEFAULT_DESCRIPTION),
            common: AgentCommon::default(),
            data,
        }
    }
}
