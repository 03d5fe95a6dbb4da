//! Back-office routes: analytics, user management and course authoring.
//!
//! Read-only routes admit administrators and analysts; anything that writes
//! admits administrators only.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use uuid::Uuid;

use crate::extract::{AuthContext, Json, Path, Query, ValidateJson};
use crate::handler::request::{
    CreateAssessmentRequest, CreateCourseRequest, CreateLessonRequest, CreateModuleRequest,
    PaginationQuery, UpdateCourseRequest, UpdateUserRequest,
};
use crate::handler::response::{
    AdminStats, AdminUser, AdminUsers, AnalyticsEnvelope, AssessmentEnvelope,
    CourseAnalyticsSummary, CourseEnvelope, CourseModules, LessonEnvelope, ModuleEnvelope,
    StatsEnvelope, UserEnvelope,
};
use crate::handler::{ErrorKind, Result};
use crate::middleware::{RoleGuard, RouterAuthExt, forbid_self_action};
use crate::service::{ServiceState, SharedCatalogStore, SharedIdentityStore};

/// Tracing target for back-office handlers.
const TRACING_TARGET: &str = "meta_server::handler::admin";

async fn platform_stats(
    State(identities): State<SharedIdentityStore>,
    State(catalog): State<SharedCatalogStore>,
) -> Result<Json<StatsEnvelope<AdminStats>>> {
    let users = identities.user_statistics().await?;
    let stats = AdminStats {
        total_users: users.total,
        active_users: users.active,
        total_courses: catalog.count_courses().await?,
        active_enrollments: catalog.count_active_enrollments().await?,
        open_tickets: catalog.count_open_tickets().await?,
    };

    Ok(Json(StatsEnvelope { stats }))
}

async fn list_users(
    State(identities): State<SharedIdentityStore>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<AdminUsers>> {
    let users = identities.list_users(pagination.into()).await?;
    Ok(Json(AdminUsers::from_models(users)))
}

/// Applies an allow-listed partial update to a user.
///
/// An administrator can neither change their own role nor deactivate
/// themselves.
#[tracing::instrument(skip_all, fields(admin_id = %context.id, user_id = %user_id))]
async fn update_user(
    State(identities): State<SharedIdentityStore>,
    context: AuthContext,
    Path(user_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<UpdateUserRequest>,
) -> Result<Json<UserEnvelope<AdminUser>>> {
    let update = request.into_model();
    if update.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_context("No valid fields to update")
            .with_resource("user"));
    }

    forbid_self_action(&context, user_id, &update)?;

    let role = update.role;
    let is_active = update.is_active;
    let Some(user) = identities.update_user(user_id, update).await? else {
        return Err(ErrorKind::NotFound
            .with_context("User not found")
            .with_resource("user"));
    };

    tracing::info!(
        target: TRACING_TARGET,
        role = ?role,
        is_active = ?is_active,
        "user updated"
    );

    Ok(Json(UserEnvelope::new(AdminUser::from_model(user))))
}

async fn create_course(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    ValidateJson(request): ValidateJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseEnvelope>)> {
    let course = catalog.create_course(request.into_model()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        admin_id = %context.id,
        course_id = %course.id,
        "course created"
    );

    Ok((StatusCode::CREATED, Json(CourseEnvelope::from_model(course))))
}

async fn update_course(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Path(course_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<UpdateCourseRequest>,
) -> Result<Json<CourseEnvelope>> {
    if request.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_context("No valid fields to update")
            .with_resource("course"));
    }

    let Some(course) = catalog
        .update_course(course_id, request.into_model())
        .await?
    else {
        return Err(ErrorKind::NotFound
            .with_context("Course not found")
            .with_resource("course"));
    };

    tracing::info!(
        target: TRACING_TARGET,
        admin_id = %context.id,
        course_id = %course.id,
        "course updated"
    );

    Ok(Json(CourseEnvelope::from_model(course)))
}

/// Fails with 404 unless the course exists.
async fn ensure_course_exists(catalog: &SharedCatalogStore, course_id: Uuid) -> Result<()> {
    if catalog.find_course_by_id(course_id).await?.is_none() {
        return Err(ErrorKind::NotFound
            .with_context("Course not found")
            .with_resource("course"));
    }

    Ok(())
}

async fn list_modules(
    State(catalog): State<SharedCatalogStore>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseModules>> {
    ensure_course_exists(&catalog, course_id).await?;

    let modules = catalog.list_course_modules(course_id).await?;
    Ok(Json(CourseModules::from_models(modules)))
}

async fn create_module(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Path(course_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<CreateModuleRequest>,
) -> Result<(StatusCode, Json<ModuleEnvelope>)> {
    let module = catalog
        .create_course_module(request.into_model(course_id))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        admin_id = %context.id,
        course_id = %course_id,
        module_id = %module.id,
        "module created"
    );

    Ok((StatusCode::CREATED, Json(ModuleEnvelope::from_model(module))))
}

async fn create_lesson(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Path(module_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonEnvelope>)> {
    let lesson = catalog.create_lesson(request.into_model(module_id)).await?;

    tracing::info!(
        target: TRACING_TARGET,
        admin_id = %context.id,
        module_id = %module_id,
        lesson_id = %lesson.id,
        "lesson created"
    );

    Ok((StatusCode::CREATED, Json(LessonEnvelope::from_model(lesson))))
}

async fn create_assessment(
    State(catalog): State<SharedCatalogStore>,
    context: AuthContext,
    Path(course_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<CreateAssessmentRequest>,
) -> Result<(StatusCode, Json<AssessmentEnvelope>)> {
    let assessment = catalog
        .create_assessment(request.into_model(course_id))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        admin_id = %context.id,
        course_id = %course_id,
        assessment_id = %assessment.id,
        "assessment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(AssessmentEnvelope::from_model(assessment)),
    ))
}

async fn course_analytics(
    State(catalog): State<SharedCatalogStore>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<AnalyticsEnvelope>> {
    ensure_course_exists(&catalog, course_id).await?;

    let analytics = catalog.course_analytics(course_id).await?;
    Ok(Json(AnalyticsEnvelope {
        analytics: CourseAnalyticsSummary::new(course_id, analytics),
    }))
}

/// Returns a [`Router`] with all `/api/admin/*` routes.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let staff = Router::new()
        .route("/api/admin/stats", get(platform_stats))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/courses/{courseId}/modules", get(list_modules))
        .route("/api/admin/courses/{courseId}/analytics", get(course_analytics))
        .with_role_guard(state.clone(), RoleGuard::STAFF);

    let admin = Router::new()
        .route("/api/admin/users/{userId}", put(update_user))
        .route("/api/admin/courses", post(create_course))
        .route("/api/admin/courses/{courseId}", put(update_course))
        .route("/api/admin/courses/{courseId}/modules", post(create_module))
        .route("/api/admin/courses/{courseId}/assessments", post(create_assessment))
        .route("/api/admin/modules/{moduleId}/lessons", post(create_lesson))
        .with_role_guard(state, RoleGuard::ADMIN);

    staff.merge(admin)
}
