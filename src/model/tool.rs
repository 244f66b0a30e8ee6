use indexmap::IndexMap;

use crate::model::common::EntityMeta;

/// Which kind of callable source a tool carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolType {
    Shared,
    #[default]
    Custom,
    Langchain,
    Crewai,
    Predefined,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::Shared => "shared",
            ToolType::Custom => "custom",
            ToolType::Langchain => "langchain",
            ToolType::Crewai => "crewai",
            ToolType::Predefined => "predefined",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "shared" => Some(ToolType::Shared),
            "custom" => Some(ToolType::Custom),
            "langchain" => Some(ToolType::Langchain),
            "crewai" => Some(ToolType::Crewai),
            "predefined" => Some(ToolType::Predefined),
            _ => None,
        }
    }

    /// Starter source content shown when a tool of this kind is created
    /// without any content of its own.
    pub fn default_content(&self, name: &str) -> String {
        match self {
            ToolType::Shared => "# Shared code, available to every agent in the flow.\n".to_string(),
            ToolType::Custom => format!(
                "def {name}() -> str:\n    \"\"\"Describe what the tool does and return its result.\"\"\"\n    raise NotImplementedError\n"
            ),
            ToolType::Langchain => format!(
                "# Wrap a LangChain tool and expose it as `{name}`.\n# Assign the tool instance to a variable named `{name}`.\n"
            ),
            ToolType::Crewai => format!(
                "# Wrap a CrewAI tool and expose it as `{name}`.\n# Assign the tool instance to a variable named `{name}`.\n"
            ),
            // Predefined tools ship their implementation with the runtime.
            ToolType::Predefined => String::new(),
        }
    }
}

/// A named unit of callable source code available to agents.
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    pub meta: EntityMeta,
    pub tool_type: ToolType,
    pub content: String,
    /// Environment-variable-shaped key/value pairs the tool needs at run
    /// time. Values are replaced with a sentinel when exporting with
    /// `hide_secrets`.
    pub secrets: IndexMap<String, String>,
}

impl Tool {
    pub const DEFAULT_NAME: &'static str = "new_tool";
    pub const DEFAULT_DESCRIPTION: &'static str = "A new tool";

    pub fn new(name: impl Into<String>, tool_type: ToolType) -> Self {
        let name = name.into();
        let content = tool_type.default_content(&name);
        Tool {
            meta: EntityMeta::new(name, Self::DEFAULT_DESCRIPTION),
            tool_type,
            content,
            secrets: IndexMap::new(),
        }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Tool::new(Self::DEFAULT_NAME, ToolType::default())
    }
}
