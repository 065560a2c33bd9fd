use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::{PrimitiveDateTime, macros::format_description};

/// One previously generated curriculum request, mirrored from the server.
/// `curriculum` stays in its raw pre-normalization form; it is normalized
/// per render, exactly like a fresh generation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub skill: String,
    pub duration: String,
    #[serde(rename = "timestamp")]
    pub timestamp_raw: String,
    pub curriculum: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    NewestFirst,
    OldestFirst,
}

/// Server timestamps arrive as space-separated local date-times. The space
/// MUST be substituted with `T` before parsing; handing the raw form to a
/// date-time parser is not portable.
pub fn parse_server_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    let delimited = raw.trim().replacen(' ', "T", 1);
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    PrimitiveDateTime::parse(&delimited, &format).ok()
}

/// History ids have been serialized as both JSON numbers and strings across
/// backend revisions; both deserialize into the opaque string form.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "history id must be a string or number, got {other}"
        ))),
    }
}
