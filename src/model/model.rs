use indexmap::IndexMap;
use serde_json::Value;

use crate::model::common::EntityMeta;

/// Which API dialect a model endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelApiType {
    #[default]
    OpenAi,
    Azure,
    Deepseek,
    Google,
    Anthropic,
    Cohere,
    Mistral,
    Groq,
    Together,
    Nim,
    Bedrock,
    Other,
}

impl ModelApiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelApiType::OpenAi => "openai",
            ModelApiType::Azure => "azure",
            ModelApiType::Deepseek => "deepseek",
            ModelApiType::Google => "google",
            ModelApiType::Anthropic => "anthropic",
            ModelApiType::Cohere => "cohere",
            ModelApiType::Mistral => "mistral",
            ModelApiType::Groq => "groq",
            ModelApiType::Together => "together",
            ModelApiType::Nim => "nim",
            ModelApiType::Bedrock => "bedrock",
            ModelApiType::Other => "other",
        }
    }

    /// Unknown literals map to `Other` rather than failing.
    pub fn parse(value: &str) -> Self {
        match value {
            "openai" => ModelApiType::OpenAi,
            "azure" => ModelApiType::Azure,
            "deepseek" => ModelApiType::Deepseek,
            "google" => ModelApiType::Google,
            "anthropic" => ModelApiType::Anthropic,
            "cohere" => ModelApiType::Cohere,
            "mistral" => ModelApiType::Mistral,
            "groq" => ModelApiType::Groq,
            "together" => ModelApiType::Together,
            "nim" => ModelApiType::Nim,
            "bedrock" => ModelApiType::Bedrock,
            _ => ModelApiType::Other,
        }
    }
}

/// Price per 1k tokens, prompt and completion sides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelPrice {
    pub prompt_price_per_1k: Option<f64>,
    pub completion_token_price_per_1k: Option<f64>,
}

/// AWS credentials for Bedrock-style endpoints. Every string here is
/// treated as a secret by the export redaction pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelAws {
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
    pub profile_name: Option<String>,
}

/// LLM endpoint configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub meta: EntityMeta,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_type: ModelApiType,
    pub api_version: Option<String>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u64>,
    pub default_headers: IndexMap<String, String>,
    pub price: ModelPrice,
    pub aws: Option<ModelAws>,
    pub extras: IndexMap<String, Value>,
}

impl Model {
    pub const DEFAULT_NAME: &'static str = "Model";
    pub const DEFAULT_DESCRIPTION: &'static str = "A new model";

    pub fn new(name: impl Into<String>) -> Self {
        Model {
            meta: EntityMeta::new(name, Self::DEFAULT_DESCRIPTION),
            base_url: None,
            api_key: None,
            api_type: ModelApiType::default(),
            api_version: None,
            temperature: None,
            top_p: None,
            max_tokens: None,
            default_headers: IndexMap::new(),
            price: ModelPrice::default(),
            aws: None,
            extras: IndexMap::new(),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new(Self::DEFAULT_NAME)
    }
}
