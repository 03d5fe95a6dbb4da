//! User assessments table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// User assessments table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum UserAssessmentConstraints {
    #[strum(serialize = "user_assessments_score_non_negative")]
    ScoreNonNegative,

    // Foreign keys, named by Postgres
    #[strum(serialize = "user_assessments_user_id_fkey")]
    UserReference,
    #[strum(serialize = "user_assessments_assessment_id_fkey")]
    AssessmentReference,

    #[strum(serialize = "user_assessments_user_assessment_unique_idx")]
    UserAssessmentUnique,
}

impl UserAssessmentConstraints {
    /// Creates a new [`UserAssessmentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            UserAssessmentConstraints::ScoreNonNegative => ConstraintCategory::Validation,
            UserAssessmentConstraints::UserReference
            | UserAssessmentConstraints::AssessmentReference => ConstraintCategory::BusinessLogic,
            UserAssessmentConstraints::UserAssessmentUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<UserAssessmentConstraints> for String {
    #[inline]
    fn from(val: UserAssessmentConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for UserAssessmentConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
