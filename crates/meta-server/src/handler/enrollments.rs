//! Course enrollment.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use meta_postgres::model::NewEnrollment;

use crate::extract::{AuthContext, Json};
use crate::handler::Result;
use crate::handler::request::CreateEnrollmentRequest;
use crate::handler::response::{Enrollment, EnrollmentEnvelope};
use crate::middleware::RouterAuthExt;
use crate::service::{ServiceState, SharedCatalogStore};

/// Tracing target for enrollment handlers.
const TRACING_TARGET: &str = "meta_server::handler::enrollments";

/// Enrolls the caller. An unknown course is `404`, a repeat is `409`.
async fn create_enrollment(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Json(request): Json<CreateEnrollmentRequest>,
) -> Result<(StatusCode, Json<EnrollmentEnvelope>)> {
    let new_enrollment = NewEnrollment {
        user_id: context.id,
        course_id: request.course_id,
    };
    let enrollment = catalog.create_enrollment(new_enrollment).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %context.id,
        course_id = %enrollment.course_id,
        "user enrolled"
    );

    let enrollment = Enrollment::from_model(enrollment);
    Ok((StatusCode::CREATED, Json(EnrollmentEnvelope { enrollment })))
}

pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/api/enrollments", post(create_enrollment))
        .with_authentication(state)
}
