use serde::Serialize;

use crate::error::{FlowError, FlowErrorLocation};

/// One machine-readable diagnostic emitted by `doctor --json`.
#[derive(Serialize, Clone, Debug)]
pub struct JsonDiagnostic {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_pointer: Option<String>,
}

impl JsonDiagnostic {
    pub fn from_location(message: String, location: FlowErrorLocation) -> Self {
        let FlowErrorLocation {
            path,
            source_path,
            json_pointer,
        } = location;
        JsonDiagnostic {
            message,
            source_path: source_path
                .as_ref()
                .map(|p| p.display().to_string())
                .or(path),
            json_pointer,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct DoctorJsonOutput {
    pub ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonDiagnostic>,
}

impl DoctorJsonOutput {
    pub fn success() -> Self {
        DoctorJsonOutput {
            ok: true,
            errors: Vec::new(),
        }
    }

    pub fn error(err: FlowError) -> Self {
        DoctorJsonOutput {
            ok: false,
            errors: flow_error_to_reports(err),
        }
    }

    pub fn into_string(self) -> String {
        serde_json::to_string(&self).expect("doctor output serialization")
    }
}

pub fn flow_error_to_reports(err: FlowError) -> Vec<JsonDiagnostic> {
    let display_message = err.to_string();
    match err {
        FlowError::Schema {
            details, location, ..
        } => {
            if details.is_empty() {
                vec![JsonDiagnostic::from_location(display_message, location)]
            } else {
                details
                    .into_iter()
                    .map(|detail| JsonDiagnostic::from_location(detail.message, detail.location))
                    .collect()
            }
        }
        FlowError::Json { location, .. }
        | FlowError::InvalidChat { location, .. }
        | FlowError::Internal { location, .. } => {
            vec![JsonDiagnostic::from_location(display_message, location)]
        }
    }
}

/// Produce the JSON payload emitted by `waldiez-flow doctor --json`.
pub fn doctor_to_stdout_json(text: &str, source_label: &str) -> String {
    match crate::schema_validate::validate_flow_str(text, source_label) {
        Ok(_) => DoctorJsonOutput::success().into_string(),
        Err(err) => DoctorJsonOutput::error(err).into_string(),
    }
}
