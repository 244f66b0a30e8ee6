/// Retrieval backend configuration of a document agent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryEngine {
    pub engine_type: Option<String>,
    pub db_path: Option<String>,
    pub enable_query_citations: bool,
    pub citation_chunk_size: Option<u64>,
}

/// Document-agent specific configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocAgentData {
    pub collection_name: Option<String>,
    pub reset_collection: bool,
    pub parsed_docs_path: Option<String>,
    pub query_engine: Option<QueryEngine>,
}
