use std::sync::OnceLock;

use jsonschema::JSONSchema;
use serde_json::json;

use crate::curriculum::{
    error::{CurriculumError, schema_violation},
    types::Curriculum,
};

/// Schema for the canonical raw form. Normalization already repairs shape
/// anomalies; this is the contract check a rendered or exported document is
/// gated on.
fn curriculum_schema() -> &'static JSONSchema {
    static SCHEMA: OnceLock<JSONSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let schema = json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "phase_title": { "type": "string", "minLength": 1 },
                    "objective": { "type": "string" },
                    "courses": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "course_title": { "type": "string", "minLength": 1 },
                                "project": { "type": "string" },
                                "topics": {
                                    "type": "array",
                                    "items": { "type": "string" }
                                }
                            },
                            "required": ["course_title", "topics"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["phase_title", "courses"],
                "additionalProperties": false
            }
        });
        JSONSchema::compile(&schema).expect("embedded curriculum schema must compile")
    })
}

pub fn validate_document(model: &Curriculum) -> Result<(), CurriculumError> {
    let document = model.to_raw();
    if let Err(errors) = curriculum_schema().validate(&document) {
        let messages: Vec<String> = errors.map(|error| error.to_string()).collect();
        return Err(schema_violation(format!(
            "curriculum failed schema validation: {}",
            messages.join("; ")
        )));
    }
    Ok(())
}
