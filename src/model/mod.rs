//! Typed value objects for every flow entity. Constructors apply the same
//! defaults the mappers do, so the types are safe to build directly.

pub mod agent;
pub mod chat;
pub mod common;
pub mod flow;
pub mod handoff;
pub mod model;
pub mod tool;

pub use agent::{Agent, AgentData};
pub use chat::{Chat, ChatMessage, ChatSummary, MessageType, NestedChatMessages, SummaryMethod};
pub use common::EntityMeta;
pub use flow::{AgentBuckets, Flow, FlowData};
pub use handoff::{Handoff, HandoffAvailability, HandoffCondition, TransitionTarget};
pub use model::{Model, ModelApiType, ModelAws, ModelPrice};
pub use tool::{Tool, ToolType};
