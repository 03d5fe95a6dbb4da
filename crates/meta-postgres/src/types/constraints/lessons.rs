//! Lessons table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Lessons table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum LessonConstraints {
    #[strum(serialize = "lessons_title_not_empty")]
    TitleNotEmpty,
    #[strum(serialize = "lessons_duration_positive")]
    DurationPositive,
    #[strum(serialize = "lessons_position_non_negative")]
    PositionNonNegative,

    // Foreign keys, named by Postgres
    #[strum(serialize = "lessons_module_id_fkey")]
    ModuleReference,
}

impl LessonConstraints {
    /// Creates a new [`LessonConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            LessonConstraints::ModuleReference => ConstraintCategory::BusinessLogic,
            _ => ConstraintCategory::Validation,
        }
    }
}

impl From<LessonConstraints> for String {
    #[inline]
    fn from(val: LessonConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for LessonConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
