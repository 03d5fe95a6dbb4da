//! Student self-service: progress, enrollments and assessments.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use uuid::Uuid;

use crate::extract::{AuthContext, Json, Path};
use crate::handler::Result;
use crate::handler::response::{Enrollments, StatsEnvelope, UserAssessments, UserStats};
use crate::middleware::RouterAuthExt;
use crate::service::{ServiceState, SharedCatalogStore};

async fn user_stats(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StatsEnvelope<UserStats>>> {
    context.ensure_self(user_id)?;

    let enrollments = catalog.user_enrollment_statistics(user_id).await?;
    let assessments = catalog.user_assessment_statistics(user_id).await?;
    Ok(Json(StatsEnvelope {
        stats: UserStats::from_statistics(enrollments, assessments),
    }))
}

async fn user_enrollments(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Enrollments>> {
    context.ensure_self(user_id)?;

    let rows = catalog.list_user_enrollments(user_id).await?;
    Ok(Json(Enrollments::from_models(rows)))
}

async fn user_assessments(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserAssessments>> {
    context.ensure_self(user_id)?;

    let rows = catalog.list_user_assessments(user_id).await?;
    Ok(Json(UserAssessments::from_models(rows)))
}

/// Returns a [`Router`] with the per-user routes.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/api/users/{userId}/stats", get(user_stats))
        .route("/api/users/{userId}/enrollments", get(user_enrollments))
        .route("/api/users/{userId}/assessments", get(user_assessments))
        .with_authentication(state)
}
