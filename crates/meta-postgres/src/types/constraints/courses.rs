//! Courses table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Courses table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum CourseConstraints {
    #[strum(serialize = "courses_title_not_empty")]
    TitleNotEmpty,
    #[strum(serialize = "courses_duration_positive")]
    DurationPositive,
    #[strum(serialize = "courses_price_non_negative")]
    PriceNonNegative,
}

impl CourseConstraints {
    /// Creates a new [`CourseConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        ConstraintCategory::Validation
    }
}

impl From<CourseConstraints> for String {
    #[inline]
    fn from(val: CourseConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for CourseConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
