//! Support ticket models.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::support_tickets;
use crate::types::{TicketPriority, TicketStatus};

/// A support request opened by a user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = support_tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SupportTicket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub message: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for opening a new support ticket.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = support_tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSupportTicket {
    pub user_id: Uuid,
    pub subject: String,
    pub message: String,
    pub priority: TicketPriority,
}
