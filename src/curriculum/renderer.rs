use crate::curriculum::types::Curriculum;

/// Screen and print projections of the same canonical model. Phase, course,
/// and topic order is preserved in both; it encodes pedagogical sequence,
/// not just display order.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurriculumRenderer;

/// Presentable projection for an interactive surface. Carries the export
/// affordance: `export_request` yields the value the export pipeline
/// consumes when the affordance is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub heading: String,
    pub phases: Vec<PhaseView>,
    skill: String,
    model: Curriculum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseView {
    pub title: String,
    pub objective: Option<String>,
    pub courses: Vec<CourseView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseView {
    pub title: String,
    pub project: Option<String>,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub skill: String,
    pub model: Curriculum,
}

impl ScreenView {
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            skill: self.skill.clone(),
            model: self.model.clone(),
        }
    }
}

/// Print-oriented document tree handed to an external document renderer.
/// `KeepTogether` groups must not be split across page boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub blocks: Vec<PrintBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Spacer,
    KeepTogether(Vec<PrintBlock>),
}

impl CurriculumRenderer {
    pub fn render_screen(&self, model: &Curriculum, skill: &str) -> ScreenView {
        let phases = model
            .phases
            .iter()
            .map(|phase| PhaseView {
                title: phase.title.clone(),
                objective: phase.objective.clone(),
                courses: phase
                    .courses
                    .iter()
                    .map(|course| CourseView {
                        title: course.title.clone(),
                        project: course.project.clone(),
                        topics: course.topics.clone(),
                    })
                    .collect(),
            })
            .collect();

        ScreenView {
            heading: format!("{skill} Curriculum"),
            phases,
            skill: skill.to_string(),
            model: model.clone(),
        }
    }

    pub fn render_print(&self, model: &Curriculum, skill: &str) -> PrintDocument {
        let mut blocks = Vec::new();

        for phase in &model.phases {
            let mut phase_group = vec![PrintBlock::Heading {
                level: 1,
                text: phase.title.clone(),
            }];
            if let Some(objective) = &phase.objective {
                phase_group.push(PrintBlock::Paragraph {
                    text: objective.clone(),
                });
            }
            phase_group.push(PrintBlock::Spacer);
            blocks.push(PrintBlock::KeepTogether(phase_group));

            for course in &phase.courses {
                let mut course_group = vec![PrintBlock::Heading {
                    level: 2,
                    text: course.title.clone(),
                }];
                if let Some(project) = &course.project {
                    course_group.push(PrintBlock::Paragraph {
                        text: format!("Project: {project}"),
                    });
                }
                course_group.push(PrintBlock::Paragraph {
                    text: format!("Key topics: {}", course.topics.join(", ")),
                });
                course_group.push(PrintBlock::Spacer);
                blocks.push(PrintBlock::KeepTogether(course_group));
            }
        }

        PrintDocument {
            title: format!("{skill} Curriculum"),
            blocks,
        }
    }
}
