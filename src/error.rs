use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where a diagnostic points inside a document or on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowErrorLocation {
    pub path: Option<String>,
    pub source_path: Option<PathBuf>,
    pub json_pointer: Option<String>,
}

impl FlowErrorLocation {
    pub fn at_path(path: impl Into<String>) -> Self {
        FlowErrorLocation {
            path: Some(path.into()),
            source_path: None,
            json_pointer: None,
        }
    }

    pub fn with_source_path(mut self, source_path: Option<&Path>) -> Self {
        self.source_path = source_path.map(Path::to_path_buf);
        self
    }

    pub fn with_json_pointer(mut self, pointer: Option<String>) -> Self {
        self.json_pointer = pointer;
        self
    }

    /// Human-readable location, if any component is set.
    pub fn describe(&self) -> Option<String> {
        let base = self
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .or_else(|| self.path.clone())?;
        match &self.json_pointer {
            Some(pointer) => Some(format!("{base}{pointer}")),
            None => Some(base),
        }
    }
}

impl fmt::Display for FlowErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.describe() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "<unknown>"),
        }
    }
}

/// One schema violation with its pointer into the offending document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrorDetail {
    pub message: String,
    pub location: FlowErrorLocation,
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("JSON parse error at {location}: {message}")]
    Json {
        message: String,
        location: FlowErrorLocation,
    },
    #[error("Schema validation failed:\n{message}")]
    Schema {
        message: String,
        details: Vec<SchemaErrorDetail>,
        location: FlowErrorLocation,
    },
    #[error("Invalid chat entry at index {index}: {message}")]
    InvalidChat {
        index: usize,
        message: String,
        location: FlowErrorLocation,
    },
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        location: FlowErrorLocation,
    },
}

impl FlowError {
    pub fn location(&self) -> &FlowErrorLocation {
        match self {
            FlowError::Json { location, .. }
            | FlowError::Schema { location, .. }
            | FlowError::InvalidChat { location, .. }
            | FlowError::Internal { location, .. } => location,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;
