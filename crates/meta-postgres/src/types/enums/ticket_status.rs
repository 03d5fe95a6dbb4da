//! Support ticket status enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Workflow state of a support ticket.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::TicketStatus"]
pub enum TicketStatus {
    /// Awaiting a first response.
    #[db_rename = "open"]
    #[serde(rename = "open")]
    #[strum(serialize = "open")]
    #[default]
    Open,

    #[db_rename = "in_progress"]
    #[serde(rename = "in_progress")]
    #[strum(serialize = "in_progress")]
    InProgress,

    #[db_rename = "resolved"]
    #[serde(rename = "resolved")]
    #[strum(serialize = "resolved")]
    Resolved,

    #[db_rename = "closed"]
    #[serde(rename = "closed")]
    #[strum(serialize = "closed")]
    Closed,
}

impl TicketStatus {
    /// Returns whether the ticket still needs attention from support staff.
    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}
