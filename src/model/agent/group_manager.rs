use indexmap::IndexMap;

/// How the group manager picks the next speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeakerSelectionMethod {
    #[default]
    Auto,
    Manual,
    Random,
    RoundRobin,
}

impl SpeakerSelectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeakerSelectionMethod::Auto => "auto",
            SpeakerSelectionMethod::Manual => "manual",
            SpeakerSelectionMethod::Random => "random",
            SpeakerSelectionMethod::RoundRobin => "round_robin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(SpeakerSelectionMethod::Auto),
            "manual" => Some(SpeakerSelectionMethod::Manual),
            "random" => Some(SpeakerSelectionMethod::Random),
            "round_robin" => Some(SpeakerSelectionMethod::RoundRobin),
            _ => None,
        }
    }
}

/// Whether the transition map lists allowed or disallowed next speakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionsType {
    #[default]
    Allowed,
    Disallowed,
}

impl TransitionsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionsType::Allowed => "allowed",
            TransitionsType::Disallowed => "disallowed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "allowed" => Some(TransitionsType::Allowed),
            "disallowed" => Some(TransitionsType::Disallowed),
            _ => None,
        }
    }
}

/// Speaker-selection policy of a group chat.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerSelection {
    pub selection_method: SpeakerSelectionMethod,
    /// Body of a custom selection method, used when the host runtime
    /// supports one; ignored by the built-in methods.
    pub selection_custom_method: Option<String>,
    pub max_retries_for_selecting: Option<u64>,
    pub allow_repeat: bool,
    pub transitions_type: TransitionsType,
    /// Agent id -> agent ids it may (or may not) hand the floor to.
    pub allowed_or_disallowed_transitions: IndexMap<String, Vec<String>>,
}

impl Default for SpeakerSelection {
    fn default() -> Self {
        SpeakerSelection {
            selection_method: SpeakerSelectionMethod::default(),
            selection_custom_method: None,
            max_retries_for_selecting: None,
            allow_repeat: true,
            transitions_type: TransitionsType::default(),
            allowed_or_disallowed_transitions: IndexMap::new(),
        }
    }
}

/// Group-manager specific configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupManagerData {
    pub max_round: Option<u64>,
    pub admin_name: Option<String>,
    pub speakers: SpeakerSelection,
}
