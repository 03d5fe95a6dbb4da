//! Course modules table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Course modules table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum CourseModuleConstraints {
    #[strum(serialize = "course_modules_title_not_empty")]
    TitleNotEmpty,
    #[strum(serialize = "course_modules_position_non_negative")]
    PositionNonNegative,

    // Foreign keys, named by Postgres
    #[strum(serialize = "course_modules_course_id_fkey")]
    CourseReference,
}

impl CourseModuleConstraints {
    /// Creates a new [`CourseModuleConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            CourseModuleConstraints::TitleNotEmpty
            | CourseModuleConstraints::PositionNonNegative => ConstraintCategory::Validation,
            CourseModuleConstraints::CourseReference => ConstraintCategory::BusinessLogic,
        }
    }
}

impl From<CourseModuleConstraints> for String {
    #[inline]
    fn from(val: CourseModuleConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for CourseModuleConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
