//! Enrollments table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Enrollments table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum EnrollmentConstraints {
    #[strum(serialize = "enrollments_progress_range")]
    ProgressRange,

    // Foreign keys, named by Postgres
    #[strum(serialize = "enrollments_user_id_fkey")]
    UserReference,
    #[strum(serialize = "enrollments_course_id_fkey")]
    CourseReference,

    #[strum(serialize = "enrollments_user_course_unique_idx")]
    UserCourseUnique,
}

impl EnrollmentConstraints {
    /// Creates a new [`EnrollmentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            EnrollmentConstraints::ProgressRange => ConstraintCategory::Validation,
            EnrollmentConstraints::UserReference | EnrollmentConstraints::CourseReference => {
                ConstraintCategory::BusinessLogic
            }
            EnrollmentConstraints::UserCourseUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<EnrollmentConstraints> for String {
    #[inline]
    fn from(val: EnrollmentConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for EnrollmentConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
