//! Liveness check.

use axum::Router;
use axum::routing::get;

use crate::extract::Json;
use crate::handler::response::Health;
use crate::middleware::SurfaceKind;
use crate::service::ServiceState;

/// Returns a [`Router`] with `/health` for the given surface.
///
/// Mounted outside the rate limit.
pub fn routes(surface: SurfaceKind) -> Router<ServiceState> {
    Router::new().route("/health", get(move || async move { Json(Health::ok(surface)) }))
}
