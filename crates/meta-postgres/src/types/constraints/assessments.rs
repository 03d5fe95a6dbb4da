//! Assessments table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Assessments table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AssessmentConstraints {
    #[strum(serialize = "assessments_title_not_empty")]
    TitleNotEmpty,
    #[strum(serialize = "assessments_max_score_positive")]
    MaxScorePositive,

    // Foreign keys, named by Postgres
    #[strum(serialize = "assessments_course_id_fkey")]
    CourseReference,
}

impl AssessmentConstraints {
    /// Creates a new [`AssessmentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AssessmentConstraints::CourseReference => ConstraintCategory::BusinessLogic,
            _ => ConstraintCategory::Validation,
        }
    }
}

impl From<AssessmentConstraints> for String {
    #[inline]
    fn from(val: AssessmentConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for AssessmentConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
