//! Support ticket priority enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Triage priority of a support ticket.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::TicketPriority"]
pub enum TicketPriority {
    #[db_rename = "low"]
    #[serde(rename = "low")]
    #[strum(serialize = "low")]
    Low,

    #[db_rename = "normal"]
    #[serde(rename = "normal")]
    #[strum(serialize = "normal")]
    #[default]
    Normal,

    #[db_rename = "high"]
    #[serde(rename = "high")]
    #[strum(serialize = "high")]
    High,

    #[db_rename = "urgent"]
    #[serde(rename = "urgent")]
    #[strum(serialize = "urgent")]
    Urgent,
}
