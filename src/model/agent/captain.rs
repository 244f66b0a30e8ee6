/// Captain-agent specific configuration: whether it draws on prebuilt
/// agent/tool libraries and how long its inner conversations may run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptainData {
    pub agent_lib: bool,
    /// `Some("default")` selects the runtime's bundled tool library.
    pub tool_lib: Option<String>,
    pub max_round: Option<u64>,
    pub max_turns: Option<u64>,
}
