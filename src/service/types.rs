use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "skill must not be empty"))]
    pub skill: String,
    pub duration: String,
    pub level: String,
}

/// Authentication/quota state as reported by the account endpoint. The
/// client surfaces these fields; it never interprets quota accounting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserState {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub searches: Option<u64>,
    #[serde(default)]
    pub guest_left: Option<u64>,
}

/// Plan length a free-form duration input maps to. Unrecognized input falls
/// back to a full two-semester plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanLength {
    HalfSemester,
    OneSemester,
    TwoSemesters,
}

impl PlanLength {
    pub fn from_duration(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "3 months" | "3 month" | "3" | "0.5" | "half" => Self::HalfSemester,
            "6 months" | "6 month" | "6" => Self::OneSemester,
            "1 year" | "1 yr" | "1" | "12 months" | "12" | "2 semesters" => Self::TwoSemesters,
            _ => Self::TwoSemesters,
        }
    }

    /// Canonical duration label sent over the wire.
    pub fn canonical_label(&self) -> &'static str {
        match self {
            Self::HalfSemester => "3 months",
            Self::OneSemester => "6 months",
            Self::TwoSemesters => "1 year",
        }
    }
}
