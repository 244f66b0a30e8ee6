use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Placement used when a node's declared position is missing or malformed.
pub const FALLBACK_POSITION: Position = Position { x: 20.0, y: 20.0 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        FALLBACK_POSITION
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Node discriminant accepted in a flow document's `nodes` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Agent,
    Model,
    Tool,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Agent => "agent",
            NodeType::Model => "model",
            NodeType::Tool => "tool",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "agent" => Some(NodeType::Agent),
            "model" => Some(NodeType::Model),
            "tool" => Some(NodeType::Tool),
            _ => None,
        }
    }
}

/// One graph node: entity identity plus layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Position,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub data: Value,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, node_type: NodeType, position: Position) -> Self {
        GraphNode {
            id: id.into(),
            node_type,
            position,
            parent_id: None,
            data: Value::Object(Default::default()),
            rest: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Chat,
    Nested,
    Hidden,
    Group,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Chat => "chat",
            EdgeType::Nested => "nested",
            EdgeType::Hidden => "hidden",
            EdgeType::Group => "group",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "chat" => Some(EdgeType::Chat),
            "nested" => Some(EdgeType::Nested),
            "hidden" => Some(EdgeType::Hidden),
            "group" => Some(EdgeType::Group),
            _ => None,
        }
    }
}

/// One directed graph edge between two agent nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    pub data: Value,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

/// Graph-shaped projection of a flow for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub viewport: Viewport,
}
