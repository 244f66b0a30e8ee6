use serde_json::{Map, Value, json};

use crate::graph::{GraphNode, NodeType, Position};
use crate::mapper::common::{
    get_meta, object_entries, opt_f64, opt_string, opt_u64, position_from, string_map,
};
use crate::mapper::{ExportOptions, SECRET_PLACEHOLDER, meta_json};
use crate::model::{Model, ModelApiType, ModelAws, ModelPrice};

const META_KEYS: [&str; 9] = [
    "id",
    "type",
    "name",
    "description",
    "tags",
    "requirements",
    "createdAt",
    "updatedAt",
    "data",
];

/// Decode one model entity; never fails, every field defaults.
pub fn import_model(value: &Value) -> Model {
    let meta = get_meta(value, Model::DEFAULT_NAME, Model::DEFAULT_DESCRIPTION, &META_KEYS);
    let empty = json!({});
    let data = value.get("data").filter(|d| d.is_object()).unwrap_or(&empty);

    let price = data
        .get("price")
        .map(|p| ModelPrice {
            prompt_price_per_1k: opt_f64(p, "promptPricePer1k"),
            completion_token_price_per_1k: opt_f64(p, "completionTokenPricePer1k"),
        })
        .unwrap_or_default();

    let aws = data
        .get("aws")
        .filter(|a| a.is_object())
        .map(|a| ModelAws {
            region: opt_string(a, "region"),
            access_key: opt_string(a, "accessKey"),
            secret_key: opt_string(a, "secretKey"),
            session_token: opt_string(a, "sessionToken"),
            profile_name: opt_string(a, "profileName"),
        });

    Model {
        meta,
        base_url: opt_string(data, "baseUrl"),
        api_key: opt_string(data, "apiKey"),
        api_type: data
            .get("apiType")
            .and_then(Value::as_str)
            .map(ModelApiType::parse)
            .unwrap_or_default(),
        api_version: opt_string(data, "apiVersion"),
        temperature: opt_f64(data, "temperature"),
        top_p: opt_f64(data, "topP"),
        max_tokens: opt_u64(data, "maxTokens"),
        default_headers: string_map(data, "defaultHeaders"),
        price,
        aws,
        extras: object_entries(data, "extras"),
    }
}

fn secret(value: &str, opts: &ExportOptions) -> Value {
    if opts.hide_secrets {
        Value::String(SECRET_PLACEHOLDER.to_string())
    } else {
        Value::String(value.to_string())
    }
}

pub fn export_model(model: &Model, opts: &ExportOptions) -> Value {
    let mut data = Map::new();
    if let Some(base_url) = &model.base_url {
        data.insert("baseUrl".into(), json!(base_url));
    }
    if let Some(api_key) = &model.api_key {
        data.insert("apiKey".into(), secret(api_key, opts));
    }
    data.insert("apiType".into(), json!(model.api_type.as_str()));
    if let Some(api_version) = &model.api_version {
        data.insert("apiVersion".into(), json!(api_version));
    }
    if let Some(temperature) = model.temperature {
        data.insert("temperature".into(), json!(temperature));
    }
    if let Some(top_p) = model.top_p {
        data.insert("topP".into(), json!(top_p));
    }
    if let Some(max_tokens) = model.max_tokens {
        data.insert("maxTokens".into(), json!(max_tokens));
    }
    if !model.default_headers.is_empty() {
        data.insert("defaultHeaders".into(), json!(model.default_headers));
    }
    let mut price = Map::new();
    if let Some(prompt) = model.price.prompt_price_per_1k {
        price.insert("promptPricePer1k".into(), json!(prompt));
    }
    if let Some(completion) = model.price.completion_token_price_per_1k {
        price.insert("completionTokenPricePer1k".into(), json!(completion));
    }
    if !price.is_empty() {
        data.insert("price".into(), Value::Object(price));
    }
    if let Some(aws) = &model.aws {
        let mut block = Map::new();
        for (key, field) in [
            ("region", &aws.region),
            ("accessKey", &aws.access_key),
            ("secretKey", &aws.secret_key),
            ("sessionToken", &aws.session_token),
            ("profileName", &aws.profile_name),
        ] {
            if let Some(value) = field {
                block.insert(key.into(), secret(value, opts));
            }
        }
        data.insert("aws".into(), Value::Object(block));
    }
    if !model.extras.is_empty() {
        data.insert("extras".into(), json!(model.extras));
    }

    let mut out = meta_json(&model.meta, "model");
    out.insert("data".into(), Value::Object(data));
    Value::Object(out)
}

/// Project a model onto a graph node, taking the position from the rest
/// bag when none is supplied.
pub fn model_as_node(model: &Model, position: Option<Position>) -> GraphNode {
    let position =
        position.unwrap_or_else(|| position_from(model.meta.rest.get("position")));
    let mut node = GraphNode::new(model.meta.id.clone(), NodeType::Model, position);
    node.parent_id = model
        .meta
        .rest
        .get("parentId")
        .and_then(Value::as_str)
        .map(str::to_string);
    node
}
