use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Generate a fresh entity id with the `wf-` document prefix.
pub fn new_id() -> String {
    format!("wf-{}", Uuid::new_v4())
}

/// Current UTC time as an RFC 3339 timestamp with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether `value` parses as an RFC 3339 / ISO-8601 timestamp.
pub fn is_timestamp(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}
