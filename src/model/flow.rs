use indexmap::IndexMap;
use serde_json::Value;

use crate::graph::{GraphEdge, GraphNode, Viewport};
use crate::model::agent::Agent;
use crate::model::chat::Chat;
use crate::model::common::EntityMeta;
use crate::model::model::Model;
use crate::model::tool::Tool;

/// Typed agent lists, one bucket per agent variant. Unknown-variant agents
/// stay in the bucket they were declared in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgentBuckets {
    pub user_proxies: Vec<Agent>,
    pub assistants: Vec<Agent>,
    pub group_managers: Vec<Agent>,
    pub doc_agents: Vec<Agent>,
    pub captains: Vec<Agent>,
    pub reasoning_agents: Vec<Agent>,
    pub remote_agents: Vec<Agent>,
}

impl AgentBuckets {
    /// All agents across every bucket, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.user_proxies
            .iter()
            .chain(&self.assistants)
            .chain(&self.group_managers)
            .chain(&self.doc_agents)
            .chain(&self.captains)
            .chain(&self.reasoning_agents)
            .chain(&self.remote_agents)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.user_proxies
            .iter_mut()
            .chain(&mut self.assistants)
            .chain(&mut self.group_managers)
            .chain(&mut self.doc_agents)
            .chain(&mut self.captains)
            .chain(&mut self.reasoning_agents)
            .chain(&mut self.remote_agents)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// The node/edge graph plus typed entity lists of one flow document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub agents: AgentBuckets,
    pub models: Vec<Model>,
    pub tools: Vec<Tool>,
    pub chats: Vec<Chat>,
    pub is_async: bool,
    pub cache_seed: Option<i64>,
    pub viewport: Viewport,
    /// Unrecognized `data` keys, preserved verbatim.
    pub rest: IndexMap<String, Value>,
}

/// The complete saved workflow document.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub meta: EntityMeta,
    /// Host-application storage handle; falls back to the flow id.
    pub storage_id: String,
    pub data: FlowData,
}

impl Flow {
    pub const DEFAULT_NAME: &'static str = "Waldiez Flow";
    pub const DEFAULT_DESCRIPTION: &'static str = "A waldiez flow";

    pub fn new() -> Self {
        let meta = EntityMeta::new(Self::DEFAULT_NAME, Self::DEFAULT_DESCRIPTION);
        let storage_id = meta.id.clone();
        Flow {
            meta,
            storage_id,
            data: FlowData::default(),
        }
    }
}

impl Default for Flow {
    fn default() -> Self {
        Flow::new()
    }
}
