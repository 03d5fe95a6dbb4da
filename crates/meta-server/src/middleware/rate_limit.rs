//! Per-client request budgets.
//!
//! Each surface layers one budget over all of its routes and may layer a
//! stricter one over individual routes (login and registration). Counters
//! live in the injected [`RateLimitStore`](crate::service::RateLimitStore).

use std::borrow::Cow;
use std::net::IpAddr;

use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum_client_ip::ClientIp;

use super::SurfaceKind;
use crate::TRACING_TARGET_SURFACE;
use crate::handler::ErrorKind;
use crate::service::{RateLimitDecision, RateLimitKey, RateLimitPolicy, SharedRateLimitStore};

/// Scope of the surface-wide budget.
pub const GLOBAL_SCOPE: &str = "global";

/// Scope of the login and registration budget.
pub const AUTH_SCOPE: &str = "auth";

/// What one rate-limit layer checks against.
#[derive(Clone)]
pub struct RateLimitLayerState {
    store: SharedRateLimitStore,
    surface: SurfaceKind,
    scope: Cow<'static, str>,
    policy: RateLimitPolicy,
}

impl RateLimitLayerState {
    /// Creates the state for one layer.
    pub fn new(
        store: SharedRateLimitStore,
        surface: SurfaceKind,
        scope: impl Into<Cow<'static, str>>,
        policy: RateLimitPolicy,
    ) -> Self {
        Self {
            store,
            surface,
            scope: scope.into(),
            policy,
        }
    }

    fn key(&self, client: Option<IpAddr>) -> RateLimitKey {
        RateLimitKey::new(self.surface.as_str(), self.scope.clone(), client)
    }
}

/// Extension trait for `axum::`[`Router`] to apply rate limits.
pub trait RouterRateLimitExt<S> {
    /// Limits every route registered so far.
    fn with_rate_limit(self, limit: RateLimitLayerState) -> Self;

    /// Limits only matched routes registered so far.
    fn with_route_rate_limit(self, limit: RateLimitLayerState) -> Self;
}

impl<S> RouterRateLimitExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_rate_limit(self, limit: RateLimitLayerState) -> Self {
        self.layer(from_fn_with_state(limit, enforce_rate_limit))
    }

    fn with_route_rate_limit(self, limit: RateLimitLayerState) -> Self {
        self.route_layer(from_fn_with_state(limit, enforce_rate_limit))
    }
}

/// Consumes one request from the client's budget or rejects with `429`.
///
/// Clients without a resolvable address share a single bucket.
pub async fn enforce_rate_limit(
    State(limit): State<RateLimitLayerState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let client = ClientIp::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|ClientIp(ip)| ip);
    let request = Request::from_parts(parts, body);

    let key = limit.key(client);
    match limit.store.acquire(&key, limit.policy).await {
        RateLimitDecision::Allowed { .. } => next.run(request).await,
        RateLimitDecision::Limited { retry_after } => {
            let retry_after_secs = retry_after.as_secs().max(1);

            tracing::warn!(
                target: TRACING_TARGET_SURFACE,
                key = %key,
                retry_after_secs,
                "rate limit exceeded"
            );

            let error = ErrorKind::TooManyRequests
                .with_context(format!("Retry after {retry_after_secs} seconds"))
                .with_resource(limit.scope.into_owned());

            (
                AppendHeaders([(RETRY_AFTER, retry_after_secs.to_string())]),
                error,
            )
                .into_response()
        }
    }
}
