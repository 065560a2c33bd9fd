use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A learning plan reduced to one canonical in-memory shape, independent of
/// how the backend encoded it. Ordering carries pedagogical sequence and is
/// preserved end to end: phases, then courses, then topics.
///
/// The serialized form uses the first key of each fallback chain the
/// normalizer accepts (`phase_title`, `course_title`, `topics`), so the
/// canonical serialization is itself a valid raw payload and normalization
/// round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curriculum {
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(rename = "phase_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "course_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Curriculum {
    /// Canonical raw form of the model. Feeding this back through the
    /// normalizer yields an identical model.
    pub fn to_raw(&self) -> Value {
        serde_json::to_value(self).expect("canonical curriculum must serialize")
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}
