//! Support tickets filed by students.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use uuid::Uuid;

use crate::extract::{AuthContext, Json, Path, ValidateJson};
use crate::handler::Result;
use crate::handler::request::CreateSupportTicketRequest;
use crate::handler::response::{SupportTicket, SupportTicketEnvelope, SupportTickets};
use crate::middleware::RouterAuthExt;
use crate::service::{ServiceState, SharedCatalogStore};

/// Tracing target for support ticket handlers.
const TRACING_TARGET: &str = "meta_server::handler::support_tickets";

async fn list_user_tickets(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SupportTickets>> {
    context.ensure_self(user_id)?;

    let tickets = catalog.list_user_tickets(user_id).await?;
    Ok(Json(SupportTickets::from_models(tickets)))
}

/// Files a ticket owned by the caller.
async fn create_ticket(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    ValidateJson(request): ValidateJson<CreateSupportTicketRequest>,
) -> Result<(StatusCode, Json<SupportTicketEnvelope>)> {
    let ticket = catalog.create_ticket(request.into_model(context.id)).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %context.id,
        ticket_id = %ticket.id,
        priority = %ticket.priority,
        "support ticket created"
    );

    let ticket = SupportTicket::from_model(ticket);
    Ok((StatusCode::CREATED, Json(SupportTicketEnvelope { ticket })))
}

pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/api/support-tickets", post(create_ticket))
        .route("/api/support-tickets/user/{userId}", get(list_user_tickets))
        .with_authentication(state)
}
