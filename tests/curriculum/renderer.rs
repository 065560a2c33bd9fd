use skillplan::curriculum::{
    renderer::{CurriculumRenderer, PrintBlock},
    types::{Course, Curriculum, Phase},
};

fn sample_model() -> Curriculum {
    Curriculum {
        phases: vec![
            Phase {
                title: "Semester 1".to_string(),
                objective: Some("Fundamentals first".to_string()),
                courses: vec![
                    Course {
                        title: "Intro".to_string(),
                        project: None,
                        topics: vec!["A".to_string(), "B".to_string()],
                    },
                    Course {
                        title: "Data Structures".to_string(),
                        project: Some("Build a queue".to_string()),
                        topics: vec!["C".to_string()],
                    },
                ],
            },
            Phase {
                title: "Semester 2".to_string(),
                objective: None,
                courses: vec![Course {
                    title: "Systems".to_string(),
                    project: None,
                    topics: vec!["D".to_string()],
                }],
            },
        ],
    }
}

#[test]
fn given_a_model_when_screen_rendered_then_order_is_preserved() {
    let view = CurriculumRenderer.render_screen(&sample_model(), "Go");

    assert_eq!(view.heading, "Go Curriculum");
    let phase_titles: Vec<&str> = view.phases.iter().map(|phase| phase.title.as_str()).collect();
    assert_eq!(phase_titles, vec!["Semester 1", "Semester 2"]);

    let course_titles: Vec<&str> = view.phases[0]
        .courses
        .iter()
        .map(|course| course.title.as_str())
        .collect();
    assert_eq!(course_titles, vec!["Intro", "Data Structures"]);
    assert_eq!(view.phases[0].courses[0].topics, vec!["A", "B"]);
}

#[test]
fn given_a_screen_view_when_export_is_requested_then_skill_and_model_ride_along() {
    let model = sample_model();
    let view = CurriculumRenderer.render_screen(&model, "Machine Learning");

    let request = view.export_request();
    assert_eq!(request.skill, "Machine Learning");
    assert_eq!(request.model, model);
}

#[test]
fn given_a_model_when_print_rendered_then_each_phase_and_course_keeps_together() {
    let document = CurriculumRenderer.render_print(&sample_model(), "Go");

    assert_eq!(document.title, "Go Curriculum");
    // One keep-together group per phase and per course.
    assert_eq!(document.blocks.len(), 2 + 3);
    assert!(
        document
            .blocks
            .iter()
            .all(|block| matches!(block, PrintBlock::KeepTogether(_)))
    );

    let PrintBlock::KeepTogether(first) = &document.blocks[0] else {
        panic!("first block must be a phase group");
    };
    assert_eq!(
        first[0],
        PrintBlock::Heading {
            level: 1,
            text: "Semester 1".to_string()
        }
    );
    assert_eq!(
        first[1],
        PrintBlock::Paragraph {
            text: "Fundamentals first".to_string()
        }
    );
}

#[test]
fn given_a_course_with_topics_when_print_rendered_then_topics_join_in_order() {
    let document = CurriculumRenderer.render_print(&sample_model(), "Go");

    let PrintBlock::KeepTogether(course_group) = &document.blocks[1] else {
        panic!("second block must be the first course group");
    };
    assert_eq!(
        course_group[0],
        PrintBlock::Heading {
            level: 2,
            text: "Intro".to_string()
        }
    );
    assert!(course_group.contains(&PrintBlock::Paragraph {
        text: "Key topics: A, B".to_string()
    }));
}

#[test]
fn given_a_course_with_project_when_print_rendered_then_project_line_appears() {
    let document = CurriculumRenderer.render_print(&sample_model(), "Go");

    let PrintBlock::KeepTogether(course_group) = &document.blocks[2] else {
        panic!("third block must be the second course group");
    };
    assert!(course_group.contains(&PrintBlock::Paragraph {
        text: "Project: Build a queue".to_string()
    }));
}
