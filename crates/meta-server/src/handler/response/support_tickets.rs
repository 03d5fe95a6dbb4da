//! Support ticket response types.

use jiff::Timestamp;
use meta_postgres::model;
use meta_postgres::types::{TicketPriority, TicketStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
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

impl SupportTicket {
    pub fn from_model(ticket: model::SupportTicket) -> Self {
        Self {
            id: ticket.id,
            user_id: ticket.user_id,
            subject: ticket.subject,
            message: ticket.message,
            status: ticket.status,
            priority: ticket.priority,
            created_at: ticket.created_at.into(),
            updated_at: ticket.updated_at.into(),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicketEnvelope {
    pub ticket: SupportTicket,
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTickets {
    pub tickets: Vec<SupportTicket>,
}

impl SupportTickets {
    pub fn from_models(tickets: Vec<model::SupportTicket>) -> Self {
        Self {
            tickets: tickets.into_iter().map(SupportTicket::from_model).collect(),
        }
    }
}
