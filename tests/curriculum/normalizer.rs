use serde_json::json;

use skillplan::curriculum::{
    error::CurriculumErrorKind,
    normalizer::{CurriculumNormalizer, DEFAULT_COURSE_TITLE, DEFAULT_PHASE_TITLE},
};

#[test]
fn given_wrapped_payload_when_normalized_then_phase_course_topics_are_ordered() {
    let raw = json!({
        "curriculum": [{
            "phase_title": "Basics",
            "courses": [{ "course_title": "Intro", "topics": ["A", "B"] }]
        }]
    });

    let model = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");

    assert_eq!(model.phases.len(), 1);
    let phase = &model.phases[0];
    assert_eq!(phase.title, "Basics");
    assert_eq!(phase.courses.len(), 1);
    let course = &phase.courses[0];
    assert_eq!(course.title, "Intro");
    assert_eq!(course.topics, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn given_string_encoded_double_wrapped_payload_when_normalized_then_it_unwraps() {
    let raw = json!({
        "curriculum": "{\"curriculum\":[{\"title\":\"P1\",\"modules\":[{\"name\":\"C1\",\"topics\":\"Only one\"}]}]}"
    });

    let model = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");

    assert_eq!(model.phases.len(), 1);
    assert_eq!(model.phases[0].title, "P1");
    assert_eq!(model.phases[0].courses.len(), 1);
    assert_eq!(model.phases[0].courses[0].title, "C1");
    assert_eq!(model.phases[0].courses[0].topics, vec!["Only one".to_string()]);
}

#[test]
fn given_missing_title_fields_when_normalized_then_fallback_defaults_apply() {
    let raw = json!([
        { "courses": [{ "topics": [] }] },
        { "label": "ignored key" }
    ]);

    let model = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");

    assert_eq!(model.phases[0].title, DEFAULT_PHASE_TITLE);
    assert_eq!(model.phases[0].courses[0].title, DEFAULT_COURSE_TITLE);
    assert_eq!(model.phases[1].title, DEFAULT_PHASE_TITLE);
}

#[test]
fn given_empty_title_strings_when_normalized_then_fallback_chain_continues() {
    let raw = json!([{ "phase_title": "  ", "name": "Stage 2" }]);

    let model = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");

    assert_eq!(model.phases[0].title, "Stage 2");
}

#[test]
fn given_bare_string_topics_when_normalized_then_one_element_sequence_results() {
    let raw = json!([{
        "title": "P",
        "courses": [
            { "title": "C1", "topics": "Only one" },
            { "title": "C2" }
        ]
    }]);

    let model = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");

    let courses = &model.phases[0].courses;
    assert_eq!(courses[0].topics, vec!["Only one".to_string()]);
    assert!(courses[1].topics.is_empty());
}

#[test]
fn given_a_canonical_raw_round_trip_when_renormalized_then_model_is_identical() {
    let raw = json!({
        "curriculum": [
            {
                "title": "Phase One",
                "goal": "walk before running",
                "modules": [
                    { "name": "C1", "topics": ["a", "b"] },
                    { "name": "C2", "topics": "single" }
                ]
            },
            { "name": "Phase Two" }
        ]
    });

    let first = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");
    let second = CurriculumNormalizer
        .normalize(&first.to_raw())
        .expect("canonical raw form should normalize");

    assert_eq!(first, second);
}

#[test]
fn given_semester_map_payload_when_normalized_then_phases_are_titled_by_key() {
    let raw = json!({
        "Semester 1": [{ "course_title": "Foundations", "topics": ["x"] }],
        "Semester 2": [{ "course_title": "Applications", "topics": ["y"] }]
    });

    let model = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");

    assert_eq!(model.phases.len(), 2);
    assert_eq!(model.phases[0].title, "Semester 1");
    assert_eq!(model.phases[0].courses[0].title, "Foundations");
    assert_eq!(model.phases[1].title, "Semester 2");
}

#[test]
fn given_phase_without_course_sequence_when_normalized_then_it_has_zero_courses() {
    let raw = json!([{ "title": "P", "courses": "not a list" }]);

    let model = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");

    assert!(model.phases[0].courses.is_empty());
}

#[test]
fn given_unparseable_string_payload_when_normalized_then_malformed_payload_is_returned() {
    let raw = json!("Semester 1: just prose, not JSON");

    let err = CurriculumNormalizer
        .normalize(&raw)
        .expect_err("prose payload must fail");
    assert_eq!(err.kind, CurriculumErrorKind::MalformedPayload);
}

#[test]
fn given_scalar_payload_root_when_normalized_then_malformed_payload_is_returned() {
    let err = CurriculumNormalizer
        .normalize(&json!(42))
        .expect_err("scalar payload must fail");
    assert_eq!(err.kind, CurriculumErrorKind::MalformedPayload);

    let err = CurriculumNormalizer
        .normalize(&json!({ "unrelated": "object" }))
        .expect_err("unrecognizable object must fail");
    assert_eq!(err.kind, CurriculumErrorKind::MalformedPayload);
}

#[test]
fn given_mixed_topic_scalars_when_normalized_then_usable_values_are_kept() {
    let raw = json!([{
        "title": "P",
        "courses": [{ "title": "C", "topics": ["a", 7, true, null, {"nested": 1}] }]
    }]);

    let model = CurriculumNormalizer
        .normalize(&raw)
        .expect("payload should normalize");

    assert_eq!(
        model.phases[0].courses[0].topics,
        vec!["a".to_string(), "7".to_string(), "true".to_string()]
    );
}
