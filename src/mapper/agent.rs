use serde_json::{Map, Value, json};

use crate::graph::{GraphNode, NodeType, Position};
use crate::mapper::common::{
    bool_or, get_meta, object_entries, opt_f64, opt_string, opt_u64, position_from, string_list,
    string_or,
};
use crate::mapper::handoff::{
    export_handoff, export_transition_target, get_handoffs, import_transition_target,
};
use crate::mapper::{ExportOptions, meta_json};
use crate::model::agent::{
    Agent, AgentCommon, AgentData, CaptainData, CodeExecution, CodeExecutionConfig, DocAgentData,
    GroupManagerData, HumanInputMode, NestedChat, NestedChatRef, QueryEngine, ReasonConfig,
    ReasonMethod, ReasoningData, RemoteData, SpeakerSelection, SpeakerSelectionMethod, Termination,
    TerminationCriterion, TerminationType, TransitionsType,
};

const META_KEYS: [&str; 10] = [
    "id",
    "type",
    "agentType",
    "name",
    "description",
    "tags",
    "requirements",
    "createdAt",
    "updatedAt",
    "data",
];

/// Decode one agent entity, dispatching on the `agentType` literal.
/// Unknown literals become the generic fallback variant and keep their
/// literal for round-tripping.
pub fn import_agent(value: &Value) -> Agent {
    let empty = json!({});
    let data = value.get("data").filter(|d| d.is_object()).unwrap_or(&empty);
    let agent_type = string_or(value, "agentType", "agent");

    let variant = match agent_type.as_str() {
        "user_proxy" => AgentData::UserProxy,
        "assistant" => AgentData::Assistant {
            multimodal: bool_or(data, "multimodal", false),
        },
        "group_manager" => AgentData::GroupManager(import_group_manager(data)),
        "doc_agent" => AgentData::DocAgent(import_doc_agent(data)),
        "captain" => AgentData::Captain(import_captain(data)),
        "reasoning" => AgentData::Reasoning(import_reasoning(data)),
        "remote" => AgentData::Remote(RemoteData {
            base_url: opt_string(data, "baseUrl"),
        }),
        _ => AgentData::Other {
            agent_type: agent_type.clone(),
        },
    };

    let meta = get_meta(
        value,
        variant.default_name(),
        Agent::DEFAULT_DESCRIPTION,
        &META_KEYS,
    );

    Agent {
        meta,
        common: import_common(data),
        data: variant,
    }
}

fn import_common(data: &Value) -> AgentCommon {
    AgentCommon {
        system_message: opt_string(data, "systemMessage"),
        human_input_mode: data
            .get("humanInputMode")
            .and_then(Value::as_str)
            .and_then(HumanInputMode::parse)
            .unwrap_or_default(),
        max_consecutive_auto_reply: opt_u64(data, "maxConsecutiveAutoReply"),
        termination: import_termination(data.get("termination")),
        code_execution: import_code_execution(data.get("codeExecutionConfig")),
        model_ids: string_list(data, "modelIds"),
        tool_ids: string_list(data, "toolIds"),
        nested_chats: import_nested_chats(data.get("nestedChats")),
        handoffs: get_handoffs(data),
        after_work: data.get("afterWork").and_then(import_transition_target),
        context_variables: object_entries(data, "contextVariables"),
    }
}

fn import_termination(value: Option<&Value>) -> Termination {
    let Some(value) = value else {
        return Termination::default();
    };
    Termination {
        termination_type: value
            .get("type")
            .and_then(Value::as_str)
            .and_then(TerminationType::parse)
            .unwrap_or_default(),
        keywords: string_list(value, "keywords"),
        criterion: value
            .get("criterion")
            .and_then(Value::as_str)
            .and_then(TerminationCriterion::parse)
            .unwrap_or_default(),
        method_content: opt_string(value, "methodContent"),
    }
}

fn import_code_execution(value: Option<&Value>) -> CodeExecution {
    match value {
        Some(value) if value.is_object() => CodeExecution::Enabled(CodeExecutionConfig {
            work_dir: opt_string(value, "workDir"),
            use_docker: value.get("useDocker").and_then(Value::as_bool),
            timeout: opt_u64(value, "timeout"),
            last_n_messages: opt_u64(value, "lastNMessages"),
            functions: string_list(value, "functions"),
        }),
        // `false`, absent, or malformed all mean no execution sandbox.
        _ => CodeExecution::Off,
    }
}

fn import_nested_chats(value: Option<&Value>) -> Vec<NestedChat> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| NestedChat {
            triggered_by: string_list(item, "triggeredBy"),
            messages: item
                .get("messages")
                .and_then(Value::as_array)
                .map(|messages| {
                    messages
                        .iter()
                        .filter_map(|message| {
                            Some(NestedChatRef {
                                id: message.get("id")?.as_str()?.to_string(),
                                is_reply: bool_or(message, "isReply", false),
                            })
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

fn import_group_manager(data: &Value) -> GroupManagerData {
    let speakers = data
        .get("speakers")
        .map(|speakers| SpeakerSelection {
            selection_method: speakers
                .get("selectionMethod")
                .and_then(Value::as_str)
                .and_then(SpeakerSelectionMethod::parse)
                .unwrap_or_default(),
            selection_custom_method: opt_string(speakers, "selectionCustomMethod"),
            max_retries_for_selecting: opt_u64(speakers, "maxRetriesForSelecting"),
            allow_repeat: bool_or(speakers, "allowRepeat", true),
            transitions_type: speakers
                .get("transitionsType")
                .and_then(Value::as_str)
                .and_then(TransitionsType::parse)
                .unwrap_or_default(),
            allowed_or_disallowed_transitions: speakers
                .get("allowedOrDisallowedTransitions")
                .and_then(Value::as_object)
                .map(|map| {
                    map.iter()
                        .filter_map(|(k, v)| {
                            let ids = v.as_array()?;
                            Some((
                                k.clone(),
                                ids.iter()
                                    .filter_map(Value::as_str)
                                    .map(str::to_string)
                                    .collect(),
                            ))
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .unwrap_or_default();

    GroupManagerData {
        max_round: opt_u64(data, "maxRound"),
        admin_name: opt_string(data, "adminName"),
        speakers,
    }
}

fn import_doc_agent(data: &Value) -> DocAgentData {
    DocAgentData {
        collection_name: opt_string(data, "collectionName"),
        reset_collection: bool_or(data, "resetCollection", false),
        parsed_docs_path: opt_string(data, "parsedDocsPath"),
        query_engine: data
            .get("queryEngine")
            .filter(|engine| engine.is_object())
            .map(|engine| QueryEngine {
                engine_type: opt_string(engine, "type"),
                db_path: opt_string(engine, "dbPath"),
                enable_query_citations: bool_or(engine, "enableQueryCitations", false),
                citation_chunk_size: opt_u64(engine, "citationChunkSize"),
            }),
    }
}

fn import_captain(data: &Value) -> CaptainData {
    CaptainData {
        agent_lib: bool_or(data, "agentLib", false),
        tool_lib: opt_string(data, "toolLib"),
        max_round: opt_u64(data, "maxRound"),
        max_turns: opt_u64(data, "maxTurns"),
    }
}

fn import_reasoning(data: &Value) -> ReasoningData {
    let config = data
        .get("reasonConfig")
        .map(|config| ReasonConfig {
            method: config
                .get("method")
                .and_then(Value::as_str)
                .and_then(ReasonMethod::parse)
                .unwrap_or_default(),
            max_depth: opt_u64(config, "maxDepth"),
            forest_size: opt_u64(config, "forestSize"),
            rating_scale: opt_u64(config, "ratingScale"),
            beam_size: opt_u64(config, "beamSize"),
            answer_approach: opt_string(config, "answerApproach"),
            nsim: opt_u64(config, "nsim"),
            exploration_constant: opt_f64(config, "explorationConstant"),
        })
        .unwrap_or_default();
    ReasoningData {
        verbose: bool_or(data, "verbose", false),
        config,
    }
}

pub fn export_agent(agent: &Agent, opts: &ExportOptions) -> Value {
    let mut data = Map::new();
    export_common(&agent.common, &mut data);
    export_variant(&agent.data, opts, &mut data);

    let mut out = meta_json(&agent.meta, "agent");
    out.insert(
        "agentType".into(),
        Value::String(agent.data.agent_type().to_string()),
    );
    out.insert("data".into(), Value::Object(data));
    Value::Object(out)
}

fn export_common(common: &AgentCommon, data: &mut Map<String, Value>) {
    if let Some(system_message) = &common.system_message {
        data.insert("systemMessage".into(), json!(system_message));
    }
    data.insert(
        "humanInputMode".into(),
        json!(common.human_input_mode.as_str()),
    );
    if let Some(limit) = common.max_consecutive_auto_reply {
        data.insert("maxConsecutiveAutoReply".into(), json!(limit));
    }
    let mut termination = Map::new();
    termination.insert(
        "type".into(),
        json!(common.termination.termination_type.as_str()),
    );
    termination.insert("keywords".into(), json!(common.termination.keywords));
    termination.insert(
        "criterion".into(),
        json!(common.termination.criterion.as_str()),
    );
    if let Some(method_content) = &common.termination.method_content {
        termination.insert("methodContent".into(), json!(method_content));
    }
    data.insert("termination".into(), Value::Object(termination));

    let code_execution = match &common.code_execution {
        CodeExecution::Off => Value::Bool(false),
        CodeExecution::Enabled(config) => {
            let mut out = Map::new();
            if let Some(work_dir) = &config.work_dir {
                out.insert("workDir".into(), json!(work_dir));
            }
            if let Some(use_docker) = config.use_docker {
                out.insert("useDocker".into(), json!(use_docker));
            }
            if let Some(timeout) = config.timeout {
                out.insert("timeout".into(), json!(timeout));
            }
            if let Some(last_n) = config.last_n_messages {
                out.insert("lastNMessages".into(), json!(last_n));
            }
            out.insert("functions".into(), json!(config.functions));
            Value::Object(out)
        }
    };
    data.insert("codeExecutionConfig".into(), code_execution);

    data.insert("modelIds".into(), json!(common.model_ids));
    data.insert("toolIds".into(), json!(common.tool_ids));
    data.insert(
        "nestedChats".into(),
        Value::Array(
            common
                .nested_chats
                .iter()
                .map(|nested| {
                    json!({
                        "triggeredBy": nested.triggered_by,
                        "messages": nested
                            .messages
                            .iter()
                            .map(|m| json!({"id": m.id, "isReply": m.is_reply}))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect(),
        ),
    );
    data.insert(
        "handoffs".into(),
        Value::Array(common.handoffs.iter().map(export_handoff).collect()),
    );
    if let Some(after_work) = &common.after_work {
        data.insert("afterWork".into(), export_transition_target(after_work));
    }
    if !common.context_variables.is_empty() {
        data.insert("contextVariables".into(), json!(common.context_variables));
    }
}

fn export_variant(variant: &AgentData, opts: &ExportOptions, data: &mut Map<String, Value>) {
    match variant {
        AgentData::UserProxy | AgentData::Other { .. } => {}
        AgentData::Assistant { multimodal } => {
            data.insert("multimodal".into(), json!(multimodal));
        }
        AgentData::GroupManager(group) => {
            if let Some(max_round) = group.max_round {
                data.insert("maxRound".into(), json!(max_round));
            }
            if let Some(admin_name) = &group.admin_name {
                data.insert("adminName".into(), json!(admin_name));
            }
            let speakers = &group.speakers;
            let mut out = Map::new();
            out.insert(
                "selectionMethod".into(),
                json!(speakers.selection_method.as_str()),
            );
            if let Some(custom) = &speakers.selection_custom_method {
                out.insert("selectionCustomMethod".into(), json!(custom));
            }
            if let Some(retries) = speakers.max_retries_for_selecting {
                out.insert("maxRetriesForSelecting".into(), json!(retries));
            }
            out.insert("allowRepeat".into(), json!(speakers.allow_repeat));
            out.insert(
                "transitionsType".into(),
                json!(speakers.transitions_type.as_str()),
            );
            out.insert(
                "allowedOrDisallowedTransitions".into(),
                json!(speakers.allowed_or_disallowed_transitions),
            );
            data.insert("speakers".into(), Value::Object(out));
        }
        AgentData::DocAgent(doc) => {
            if let Some(collection_name) = &doc.collection_name {
                data.insert("collectionName".into(), json!(collection_name));
            }
            data.insert("resetCollection".into(), json!(doc.reset_collection));
            if let Some(path) = &doc.parsed_docs_path {
                data.insert("parsedDocsPath".into(), json!(path));
            }
            if let Some(engine) = &doc.query_engine {
                let mut out = Map::new();
                if let Some(engine_type) = &engine.engine_type {
                    out.insert("type".into(), json!(engine_type));
                }
                if let Some(db_path) = &engine.db_path {
                    out.insert("dbPath".into(), json!(db_path));
                }
                out.insert(
                    "enableQueryCitations".into(),
                    json!(engine.enable_query_citations),
                );
                if let Some(chunk) = engine.citation_chunk_size {
                    out.insert("citationChunkSize".into(), json!(chunk));
                }
                data.insert("queryEngine".into(), Value::Object(out));
            }
        }
        AgentData::Captain(captain) => {
            if opts.skip_links {
                data.insert("agentLib".into(), json!(false));
            } else {
                data.insert("agentLib".into(), json!(captain.agent_lib));
                if let Some(tool_lib) = &captain.tool_lib {
                    data.insert("toolLib".into(), json!(tool_lib));
                }
            }
            if let Some(max_round) = captain.max_round {
                data.insert("maxRound".into(), json!(max_round));
            }
            if let Some(max_turns) = captain.max_turns {
                data.insert("maxTurns".into(), json!(max_turns));
            }
        }
        AgentData::Reasoning(reasoning) => {
            data.insert("verbose".into(), json!(reasoning.verbose));
            let config = &reasoning.config;
            let mut out = Map::new();
            out.insert("method".into(), json!(config.method.as_str()));
            for (key, field) in [
                ("maxDepth", config.max_depth),
                ("forestSize", config.forest_size),
                ("ratingScale", config.rating_scale),
                ("beamSize", config.beam_size),
                ("nsim", config.nsim),
            ] {
                if let Some(value) = field {
                    out.insert(key.into(), json!(value));
                }
            }
            if let Some(approach) = &config.answer_approach {
                out.insert("answerApproach".into(), json!(approach));
            }
            if let Some(constant) = config.exploration_constant {
                out.insert("explorationConstant".into(), json!(constant));
            }
            data.insert("reasonConfig".into(), Value::Object(out));
        }
        AgentData::Remote(remote) => {
            if let Some(base_url) = &remote.base_url {
                data.insert("baseUrl".into(), json!(base_url));
            }
        }
    }
}

pub fn agent_as_node(agent: &Agent, position: Option<Position>) -> GraphNode {
    let position = position.unwrap_or_else(|| position_from(agent.meta.rest.get("position")));
    let mut node = GraphNode::new(agent.meta.id.clone(), NodeType::Agent, position);
    node.parent_id = agent
        .meta
        .rest
        .get("parentId")
        .and_then(Value::as_str)
        .map(str::to_string);
    node
}
