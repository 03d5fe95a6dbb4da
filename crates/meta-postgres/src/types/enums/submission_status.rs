//! Submission status enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Progress of a student's attempt at an assessment.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::SubmissionStatus"]
pub enum SubmissionStatus {
    #[db_rename = "pending"]
    #[serde(rename = "pending")]
    #[strum(serialize = "pending")]
    #[default]
    Pending,

    #[db_rename = "submitted"]
    #[serde(rename = "submitted")]
    #[strum(serialize = "submitted")]
    Submitted,

    #[db_rename = "graded"]
    #[serde(rename = "graded")]
    #[strum(serialize = "graded")]
    Graded,
}

impl SubmissionStatus {
    /// Whether a score has been recorded and released.
    #[inline]
    pub fn is_graded(self) -> bool {
        matches!(self, Self::Graded)
    }
}
