//! Registration, login, current identity and token refresh.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};

use crate::extract::{AuthContext, Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{LoginRequest, RegisterRequest};
use crate::handler::response::{AuthResponse, CurrentUser, RefreshResponse, UserEnvelope};
use crate::middleware::{RateLimitLayerState, RouterAuthExt, RouterRateLimitExt};
use crate::service::{AuthService, ServiceState};

/// Tracing target for authentication handlers.
const TRACING_TARGET: &str = "meta_server::handler::authentication";

/// Creates an account with the `user` role.
#[tracing::instrument(skip_all)]
async fn register(
    State(auth_service): State<AuthService>,
    ValidateJson(request): ValidateJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    tracing::trace!(target: TRACING_TARGET, "registration attempt");

    let session = auth_service
        .register(&request.email, &request.password, request.name)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Exchanges credentials for a token.
#[tracing::instrument(skip_all)]
async fn login(
    State(auth_service): State<AuthService>,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    tracing::trace!(target: TRACING_TARGET, "login attempt");

    let session = auth_service.login(&request.email, &request.password).await?;
    Ok(Json(session.into()))
}

/// Returns the identity the request is authenticated as.
async fn me(context: AuthContext) -> Json<UserEnvelope<CurrentUser>> {
    Json(UserEnvelope::new(context.into()))
}

/// Issues a fresh token for the authenticated identity.
#[tracing::instrument(skip_all, fields(user_id = %context.id))]
async fn refresh(
    State(auth_service): State<AuthService>,
    context: AuthContext,
) -> Result<Json<RefreshResponse>> {
    let token = auth_service.refresh(&context)?;
    Ok(Json(RefreshResponse { token }))
}

/// Returns a [`Router`] with all authentication routes.
///
/// Login and registration get the optional stricter budget in addition to
/// the surface-wide one.
pub fn routes(
    state: ServiceState,
    auth_limit: Option<RateLimitLayerState>,
) -> Router<ServiceState> {
    let mut credentials = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));
    if let Some(limit) = auth_limit {
        credentials = credentials.with_route_rate_limit(limit);
    }

    let session = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/refresh", post(refresh))
        .with_authentication(state);

    credentials.merge(session)
}
