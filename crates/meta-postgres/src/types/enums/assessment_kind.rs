//! Assessment kind enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// What sort of work an assessment asks for.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::AssessmentKind"]
pub enum AssessmentKind {
    #[db_rename = "quiz"]
    #[serde(rename = "quiz")]
    #[strum(serialize = "quiz")]
    #[default]
    Quiz,

    #[db_rename = "assignment"]
    #[serde(rename = "assignment")]
    #[strum(serialize = "assignment")]
    Assignment,

    #[db_rename = "exam"]
    #[serde(rename = "exam")]
    #[strum(serialize = "exam")]
    Exam,
}
