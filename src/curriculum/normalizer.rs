use serde_json::{Map, Value};

use crate::curriculum::{
    error::{CurriculumError, malformed_payload},
    types::{Course, Curriculum, Phase},
};

/// Key priority lists for locating a logical field across the payload shapes
/// the backend has produced over time. First present-and-matching-type wins.
const WRAPPER_KEYS: &[&str] = &["curriculum", "phases", "plan"];
const PHASE_TITLE_KEYS: &[&str] = &["phase_title", "title", "name"];
const PHASE_OBJECTIVE_KEYS: &[&str] = &["objective", "goal", "summary"];
const COURSE_LIST_KEYS: &[&str] = &["courses", "modules", "topics"];
const COURSE_TITLE_KEYS: &[&str] = &["course_title", "title", "name"];
const COURSE_PROJECT_KEYS: &[&str] = &["project", "capstone", "exercise"];
const TOPIC_KEYS: &[&str] = &["topics", "key_topics"];

pub const DEFAULT_PHASE_TITLE: &str = "Learning Phase";
pub const DEFAULT_COURSE_TITLE: &str = "Course";

/// String-parse/unwrap rounds attempted before the payload is declared
/// malformed. Historical payloads double-wrap at most twice.
const MAX_UNWRAP_DEPTH: usize = 6;

#[derive(Debug, Default, Clone, Copy)]
pub struct CurriculumNormalizer;

impl CurriculumNormalizer {
    /// Converts a raw curriculum payload into the canonical model.
    ///
    /// Missing optional fields are repaired via the fallback chains; only a
    /// payload that cannot produce a phase sequence at all is an error.
    /// Normalization is deterministic and idempotent over the canonical raw
    /// form.
    pub fn normalize(&self, raw: &Value) -> Result<Curriculum, CurriculumError> {
        let elements = unwrap_to_sequence(raw)?;
        let phases = elements.iter().map(normalize_phase).collect();
        Ok(Curriculum { phases })
    }
}

/// Peels string-encoded JSON and wrapper objects until a phase sequence
/// surfaces. An object without a wrapper field is accepted as a semester map
/// (`{"Semester 1": [courses...]}`) when every value is an array.
fn unwrap_to_sequence(raw: &Value) -> Result<Vec<Value>, CurriculumError> {
    let mut value = raw.clone();
    for _ in 0..MAX_UNWRAP_DEPTH {
        match value {
            Value::Array(elements) => return Ok(elements),
            Value::String(text) => {
                value = serde_json::from_str(text.trim()).map_err(|err| {
                    malformed_payload(format!("string payload is not structured data: {err}"))
                })?;
            }
            Value::Object(fields) => {
                if let Some(inner) = first_present(&fields, WRAPPER_KEYS) {
                    value = inner.clone();
                } else if let Some(elements) = semester_map_elements(&fields) {
                    return Ok(elements);
                } else {
                    return Err(malformed_payload(
                        "object payload carries no curriculum field",
                    ));
                }
            }
            other => {
                return Err(malformed_payload(format!(
                    "payload root must be a sequence, got {}",
                    json_type_name(&other)
                )));
            }
        }
    }
    Err(malformed_payload("payload nesting exceeds unwrap depth"))
}

/// First backend revision returned an object keyed by semester label. Each
/// entry becomes a phase titled by its key, in deterministic key order.
fn semester_map_elements(fields: &Map<String, Value>) -> Option<Vec<Value>> {
    if fields.is_empty() || !fields.values().all(Value::is_array) {
        return None;
    }
    let elements = fields
        .iter()
        .map(|(title, courses)| serde_json::json!({ "phase_title": title, "courses": courses }))
        .collect();
    Some(elements)
}

fn normalize_phase(element: &Value) -> Phase {
    if let Some(text) = nonempty_str(element) {
        return Phase {
            title: text,
            objective: None,
            courses: Vec::new(),
        };
    }

    let courses = first_sequence(element, COURSE_LIST_KEYS)
        .map(|elements| elements.iter().map(normalize_course).collect())
        .unwrap_or_default();

    Phase {
        title: first_string(element, PHASE_TITLE_KEYS)
            .unwrap_or_else(|| DEFAULT_PHASE_TITLE.to_string()),
        objective: first_string(element, PHASE_OBJECTIVE_KEYS),
        courses,
    }
}

fn normalize_course(element: &Value) -> Course {
    if let Some(text) = nonempty_str(element) {
        return Course {
            title: text,
            project: None,
            topics: Vec::new(),
        };
    }

    let topics = element
        .as_object()
        .and_then(|fields| first_present(fields, TOPIC_KEYS))
        .map(normalize_topics)
        .unwrap_or_default();

    Course {
        title: first_string(element, COURSE_TITLE_KEYS)
            .unwrap_or_else(|| DEFAULT_COURSE_TITLE.to_string()),
        project: first_string(element, COURSE_PROJECT_KEYS),
        topics,
    }
}

/// Coerces scalar-or-missing topic data into a sequence of strings: a bare
/// string becomes a one-element sequence, anything unusable an empty one.
fn normalize_topics(value: &Value) -> Vec<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
        Value::Array(elements) => elements.iter().filter_map(topic_text).collect(),
        Value::Number(number) => vec![number.to_string()],
        _ => Vec::new(),
    }
}

fn topic_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn first_present<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| fields.get(*key))
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    let fields = value.as_object()?;
    keys.iter().find_map(|key| {
        fields
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

fn first_sequence<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    let fields = value.as_object()?;
    keys.iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_array))
}

fn nonempty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
