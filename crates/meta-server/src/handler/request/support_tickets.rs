//! Support ticket payloads.

use meta_postgres::model::NewSupportTicket;
use meta_postgres::types::TicketPriority;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payload for `POST /api/support-tickets`.
///
/// Carries no user id; the ticket always belongs to the caller.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupportTicketRequest {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
}

impl CreateSupportTicketRequest {
    /// Converts into a ticket owned by `user_id`.
    pub fn into_model(self, user_id: Uuid) -> NewSupportTicket {
        NewSupportTicket {
            user_id,
            subject: self.subject,
            message: self.message,
            priority: self.priority.unwrap_or_default(),
        }
    }
}
