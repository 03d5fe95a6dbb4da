//! Request tracing and request ids.

use axum::Router;
use axum::extract::Request;
use axum::http::header::{self, HeaderName, HeaderValue};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::SurfaceKind;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates time-ordered UUID v7 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Adds request ids, redacts credentials from logs and opens one span
    /// per request tagged with the surface name.
    fn with_observability(self, surface: SurfaceKind) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self, surface: SurfaceKind) -> Self {
        let trace_layer = TraceLayer::new_for_http().make_span_with(move |request: &Request| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("unknown");

            tracing::info_span!(
                "request",
                surface = surface.as_str(),
                method = %request.method(),
                uri = %request.uri().path(),
                request_id = %request_id,
            )
        });

        let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

        // Outermost layer last: the id is set before the trace span opens.
        self.layer(PropagateRequestIdLayer::new(request_id_header.clone()))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(trace_layer)
            .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuidV7))
    }
}
