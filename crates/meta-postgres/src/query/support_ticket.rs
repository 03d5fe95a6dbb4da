//! Support ticket repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewSupportTicket, SupportTicket};
use crate::types::TicketStatus;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for support ticket database operations.
pub trait SupportTicketRepository {
    /// Opens a new ticket.
    fn create_ticket(
        &mut self,
        new_ticket: NewSupportTicket,
    ) -> impl Future<Output = PgResult<SupportTicket>> + Send;

    /// Lists a user's tickets, newest first.
    fn list_user_tickets(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<SupportTicket>>> + Send;

    /// Counts tickets that are open or in progress.
    fn count_open_tickets(&mut self) -> impl Future<Output = PgResult<i64>> + Send;
}

impl SupportTicketRepository for PgConnection {
    async fn create_ticket(&mut self, mut new_ticket: NewSupportTicket) -> PgResult<SupportTicket> {
        use schema::support_tickets;

        new_ticket.subject = new_ticket.subject.trim().to_owned();

        diesel::insert_into(support_tickets::table)
            .values(&new_ticket)
            .returning(SupportTicket::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_user_tickets(&mut self, user_id: Uuid) -> PgResult<Vec<SupportTicket>> {
        use schema::support_tickets::{self, dsl};

        support_tickets::table
            .filter(dsl::user_id.eq(user_id))
            .order(dsl::created_at.desc())
            .select(SupportTicket::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn count_open_tickets(&mut self) -> PgResult<i64> {
        use schema::support_tickets::{self, dsl};

        support_tickets::table
            .filter(dsl::status.eq_any([TicketStatus::Open, TicketStatus::InProgress]))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }
}
