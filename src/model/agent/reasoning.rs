/// Search strategy used by a reasoning agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReasonMethod {
    #[default]
    BeamSearch,
    Mcts,
    Lats,
    Dfs,
}

impl ReasonMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonMethod::BeamSearch => "beam_search",
            ReasonMethod::Mcts => "mcts",
            ReasonMethod::Lats => "lats",
            ReasonMethod::Dfs => "dfs",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beam_search" => Some(ReasonMethod::BeamSearch),
            "mcts" => Some(ReasonMethod::Mcts),
            "lats" => Some(ReasonMethod::Lats),
            "dfs" => Some(ReasonMethod::Dfs),
            _ => None,
        }
    }
}

/// Search-tree tuning for a reasoning agent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReasonConfig {
    pub method: ReasonMethod,
    pub max_depth: Option<u64>,
    pub forest_size: Option<u64>,
    pub rating_scale: Option<u64>,
    pub beam_size: Option<u64>,
    pub answer_approach: Option<String>,
    pub nsim: Option<u64>,
    pub exploration_constant: Option<f64>,
}

/// Reasoning-agent specific configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReasoningData {
    pub verbose: bool,
    pub config: ReasonConfig,
}
