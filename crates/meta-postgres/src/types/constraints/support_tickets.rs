//! Support tickets table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Support tickets table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum SupportTicketConstraints {
    #[strum(serialize = "support_tickets_subject_not_empty")]
    SubjectNotEmpty,
    #[strum(serialize = "support_tickets_message_not_empty")]
    MessageNotEmpty,

    #[strum(serialize = "support_tickets_user_id_fkey")]
    UserReference,
}

impl SupportTicketConstraints {
    /// Creates a new [`SupportTicketConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            SupportTicketConstraints::SubjectNotEmpty
            | SupportTicketConstraints::MessageNotEmpty => ConstraintCategory::Validation,
            SupportTicketConstraints::UserReference => ConstraintCategory::BusinessLogic,
        }
    }
}

impl From<SupportTicketConstraints> for String {
    #[inline]
    fn from(val: SupportTicketConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for SupportTicketConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
