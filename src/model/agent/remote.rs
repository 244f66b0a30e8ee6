/// Remote-agent specific configuration: where the agent actually lives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteData {
    pub base_url: Option<String>,
}
