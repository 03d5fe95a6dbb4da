//! Anonymous catalog browsing.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use uuid::Uuid;

use crate::extract::{Json, Path, Query};
use crate::handler::request::PaginationQuery;
use crate::handler::response::{CourseDetail, CourseDetailEnvelope, Courses};
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceState, SharedCatalogStore};

async fn list_courses(
    State(catalog): State<SharedCatalogStore>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<Courses>> {
    let courses = catalog.list_courses(pagination.into()).await?;
    Ok(Json(Courses::from_models(courses)))
}

/// Returns a course with its modules and their lessons.
async fn get_course(
    State(catalog): State<SharedCatalogStore>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseDetailEnvelope>> {
    let Some(course) = catalog.find_course_by_id(course_id).await? else {
        return Err(ErrorKind::NotFound
            .with_context("Course not found")
            .with_resource("course"));
    };

    let modules = catalog.list_course_modules(course_id).await?;
    let module_ids = modules.iter().map(|module| module.id).collect();
    let lessons = catalog.list_module_lessons(module_ids).await?;

    Ok(Json(CourseDetailEnvelope {
        course: CourseDetail::from_models(course, modules, lessons),
    }))
}

/// Returns a [`Router`] with the catalog routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/api/courses", get(list_courses))
        .route("/api/courses/{courseId}", get(get_course))
}
