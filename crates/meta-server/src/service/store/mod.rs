//! Storage seams between the HTTP layer and the database.
//!
//! The repository traits in `meta-postgres` are implemented on the raw
//! connection and are not object safe, so the service talks to these two
//! narrower traits instead. [`PgStore`] forwards each call to a pooled
//! connection; tests swap in an in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use meta_postgres::PgResult;
use meta_postgres::model::{
    Assessment, Course, CourseModule, Enrollment, Lesson, NewAssessment, NewCourse,
    NewCourseModule, NewEnrollment, NewLesson, NewSupportTicket, NewUser, SupportTicket,
    UpdateCourse, UpdateUser, User, UserAssessment,
};
use meta_postgres::query::{
    AssessmentStatistics, CourseAnalytics, EnrollmentStatistics, UserStatistics,
};
use meta_postgres::types::OffsetPagination;
use uuid::Uuid;

#[cfg(test)]
mod memory_store;
mod pg_store;

#[cfg(test)]
pub use memory_store::MemoryStore;
pub use pg_store::PgStore;

/// Credential store: the user records behind every identity.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Inserts a user. A duplicate email fails on the unique constraint.
    async fn create_user(&self, new_user: NewUser) -> PgResult<User>;

    async fn find_user_by_id(&self, user_id: Uuid) -> PgResult<Option<User>>;

    /// Looks a user up by exact email.
    async fn find_user_by_email(&self, email: &str) -> PgResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> PgResult<bool>;

    /// Applies a partial update, returning `None` for an unknown id.
    async fn update_user(&self, user_id: Uuid, updates: UpdateUser) -> PgResult<Option<User>>;

    async fn list_users(&self, pagination: OffsetPagination) -> PgResult<Vec<User>>;

    async fn user_statistics(&self) -> PgResult<UserStatistics>;
}

/// Course catalog and structure, enrollments, assessments and support
/// tickets.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn create_course(&self, new_course: NewCourse) -> PgResult<Course>;

    async fn find_course_by_id(&self, course_id: Uuid) -> PgResult<Option<Course>>;

    async fn list_courses(&self, pagination: OffsetPagination) -> PgResult<Vec<Course>>;

    async fn update_course(
        &self,
        course_id: Uuid,
        updates: UpdateCourse,
    ) -> PgResult<Option<Course>>;

    async fn count_courses(&self) -> PgResult<i64>;

    /// Aggregates one course's figures. All zero for an unknown course.
    async fn course_analytics(&self, course_id: Uuid) -> PgResult<CourseAnalytics>;

    /// Adds a module. An unknown course fails on the foreign key.
    async fn create_course_module(&self, new_module: NewCourseModule) -> PgResult<CourseModule>;

    async fn list_course_modules(&self, course_id: Uuid) -> PgResult<Vec<CourseModule>>;

    /// Adds a lesson. An unknown module fails on the foreign key.
    async fn create_lesson(&self, new_lesson: NewLesson) -> PgResult<Lesson>;

    /// Lists the lessons of the given modules in display order.
    async fn list_module_lessons(&self, module_ids: Vec<Uuid>) -> PgResult<Vec<Lesson>>;

    /// Adds an assessment. An unknown course fails on the foreign key.
    async fn create_assessment(&self, new_assessment: NewAssessment) -> PgResult<Assessment>;

    /// Lists a user's submissions, each joined with its assessment and course.
    async fn list_user_assessments(
        &self,
        user_id: Uuid,
    ) -> PgResult<Vec<(UserAssessment, Assessment, Course)>>;

    async fn user_assessment_statistics(&self, user_id: Uuid) -> PgResult<AssessmentStatistics>;

    async fn create_enrollment(&self, new_enrollment: NewEnrollment) -> PgResult<Enrollment>;

    /// Lists a user's enrollments, each joined with its course.
    async fn list_user_enrollments(&self, user_id: Uuid) -> PgResult<Vec<(Enrollment, Course)>>;

    async fn user_enrollment_statistics(&self, user_id: Uuid) -> PgResult<EnrollmentStatistics>;

    async fn count_active_enrollments(&self) -> PgResult<i64>;

    async fn create_ticket(&self, new_ticket: NewSupportTicket) -> PgResult<SupportTicket>;

    async fn list_user_tickets(&self, user_id: Uuid) -> PgResult<Vec<SupportTicket>>;

    async fn count_open_tickets(&self) -> PgResult<i64>;
}

/// Shared handle to the credential store.
pub type SharedIdentityStore = Arc<dyn IdentityStore>;

/// Shared handle to the catalog store.
pub type SharedCatalogStore = Arc<dyn CatalogStore>;
