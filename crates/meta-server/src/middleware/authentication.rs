//! Authentication and role-guard layering for routers.

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use super::authorization::{RoleGuard, require_role};
use crate::extract::AuthContext;
use crate::service::ServiceState;

/// Extension trait for `axum::`[`Router`] to gate routes behind
/// authentication and roles.
///
/// Both methods use `route_layer`, so unmatched paths still fall through to
/// the surface's generic 404 instead of a 401.
pub trait RouterAuthExt<S> {
    /// Requires a verified identity on every route registered so far.
    fn with_authentication(self, state: ServiceState) -> Self;

    /// Requires a verified identity holding one of the guard's roles.
    ///
    /// Layers the authenticator outside the guard, so the guard always sees
    /// the context the authenticator attached.
    fn with_role_guard(self, state: ServiceState, guard: RoleGuard) -> Self;
}

impl<S> RouterAuthExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_authentication(self, state: ServiceState) -> Self {
        self.route_layer(from_fn_with_state(state, require_authentication))
    }

    fn with_role_guard(self, state: ServiceState, guard: RoleGuard) -> Self {
        self.route_layer(from_fn_with_state(guard, require_role))
            .route_layer(from_fn_with_state(state, require_authentication))
    }
}

/// Resolves the [`AuthContext`] and attaches it to the request.
///
/// The extractor caches the context in the request extensions, so handlers
/// and the role guard read it without a second lookup.
pub async fn require_authentication(
    _context: AuthContext,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
