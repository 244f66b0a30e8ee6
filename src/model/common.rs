use indexmap::IndexMap;
use serde_json::Value;

use crate::util::{new_id, now_timestamp};

/// Fields shared by every flow entity, plus the rest bag of unrecognized
/// top-level keys preserved verbatim for round-tripping.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMeta {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub requirements: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub rest: IndexMap<String, Value>,
}

impl EntityMeta {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = now_timestamp();
        EntityMeta {
            id: new_id(),
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            requirements: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
            rest: IndexMap::new(),
        }
    }
}
