use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurriculumErrorKind {
    MalformedPayload,
    SchemaViolation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumError {
    pub kind: CurriculumErrorKind,
    pub message: String,
}

impl CurriculumError {
    pub fn new(kind: CurriculumErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for CurriculumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CurriculumError {}

pub fn malformed_payload(message: impl Into<String>) -> CurriculumError {
    CurriculumError::new(CurriculumErrorKind::MalformedPayload, message)
}

pub fn schema_violation(message: impl Into<String>) -> CurriculumError {
    CurriculumError::new(CurriculumErrorKind::SchemaViolation, message)
}
