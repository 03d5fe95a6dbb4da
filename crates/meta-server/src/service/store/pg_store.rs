use async_trait::async_trait;
use meta_postgres::model::{
    Assessment, Course, CourseModule, Enrollment, Lesson, NewAssessment, NewCourse,
    NewCourseModule, NewEnrollment, NewLesson, NewSupportTicket, NewUser, SupportTicket,
    UpdateCourse, UpdateUser, User, UserAssessment,
};
use meta_postgres::query::{
    AssessmentRepository, AssessmentStatistics, CourseAnalytics, CourseRepository,
    CurriculumRepository, EnrollmentRepository, EnrollmentStatistics, SupportTicketRepository,
    UserRepository, UserStatistics,
};
use meta_postgres::types::OffsetPagination;
use meta_postgres::{PgClient, PgResult};
use uuid::Uuid;

use super::{CatalogStore, IdentityStore};

/// Postgres-backed store; every call checks a connection out of the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    client: PgClient,
}

impl PgStore {
    /// Creates a new store over the client's pool.
    #[inline]
    pub fn new(client: PgClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[inline]
    pub fn client(&self) -> &PgClient {
        &self.client
    }
}

#[async_trait]
impl IdentityStore for PgStore {
    async fn create_user(&self, new_user: NewUser) -> PgResult<User> {
        let mut conn = self.client.get_connection().await?;
        conn.create_user(new_user).await
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> PgResult<Option<User>> {
        let mut conn = self.client.get_connection().await?;
        conn.find_user_by_id(user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> PgResult<Option<User>> {
        let mut conn = self.client.get_connection().await?;
        conn.find_user_by_email(email).await
    }

    async fn email_exists(&self, email: &str) -> PgResult<bool> {
        let mut conn = self.client.get_connection().await?;
        conn.email_exists(email).await
    }

    async fn update_user(&self, user_id: Uuid, updates: UpdateUser) -> PgResult<Option<User>> {
        let mut conn = self.client.get_connection().await?;
        conn.update_user(user_id, updates).await
    }

    async fn list_users(&self, pagination: OffsetPagination) -> PgResult<Vec<User>> {
        let mut conn = self.client.get_connection().await?;
        conn.list_users(pagination).await
    }

    async fn user_statistics(&self) -> PgResult<UserStatistics> {
        let mut conn = self.client.get_connection().await?;
        conn.user_statistics().await
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn create_course(&self, new_course: NewCourse) -> PgResult<Course> {
        let mut conn = self.client.get_connection().await?;
        conn.create_course(new_course).await
    }

    async fn find_course_by_id(&self, course_id: Uuid) -> PgResult<Option<Course>> {
        let mut conn = self.client.get_connection().await?;
        conn.find_course_by_id(course_id).await
    }

    async fn list_courses(&self, pagination: OffsetPagination) -> PgResult<Vec<Course>> {
        let mut conn = self.client.get_connection().await?;
        conn.list_courses(pagination).await
    }

    async fn update_course(
        &self,
        course_id: Uuid,
        updates: UpdateCourse,
    ) -> PgResult<Option<Course>> {
        let mut conn = self.client.get_connection().await?;
        conn.update_course(course_id, updates).await
    }

    async fn count_courses(&self) -> PgResult<i64> {
        let mut conn = self.client.get_connection().await?;
        conn.count_courses().await
    }

    async fn course_analytics(&self, course_id: Uuid) -> PgResult<CourseAnalytics> {
        let mut conn = self.client.get_connection().await?;
        conn.course_analytics(course_id).await
    }

    async fn create_course_module(&self, new_module: NewCourseModule) -> PgResult<CourseModule> {
        let mut conn = self.client.get_connection().await?;
        conn.create_course_module(new_module).await
    }

    async fn list_course_modules(&self, course_id: Uuid) -> PgResult<Vec<CourseModule>> {
        let mut conn = self.client.get_connection().await?;
        conn.list_course_modules(course_id).await
    }

    async fn create_lesson(&self, new_lesson: NewLesson) -> PgResult<Lesson> {
        let mut conn = self.client.get_connection().await?;
        conn.create_lesson(new_lesson).await
    }

    async fn list_module_lessons(&self, module_ids: Vec<Uuid>) -> PgResult<Vec<Lesson>> {
        let mut conn = self.client.get_connection().await?;
        conn.list_module_lessons(module_ids).await
    }

    async fn create_assessment(&self, new_assessment: NewAssessment) -> PgResult<Assessment> {
        let mut conn = self.client.get_connection().await?;
        conn.create_assessment(new_assessment).await
    }

    async fn list_user_assessments(
        &self,
        user_id: Uuid,
    ) -> PgResult<Vec<(UserAssessment, Assessment, Course)>> {
        let mut conn = self.client.get_connection().await?;
        conn.list_user_assessments(user_id).await
    }

    async fn user_assessment_statistics(&self, user_id: Uuid) -> PgResult<AssessmentStatistics> {
        let mut conn = self.client.get_connection().await?;
        conn.user_assessment_statistics(user_id).await
    }

    async fn create_enrollment(&self, new_enrollment: NewEnrollment) -> PgResult<Enrollment> {
        let mut conn = self.client.get_connection().await?;
        conn.create_enrollment(new_enrollment).await
    }

    async fn list_user_enrollments(&self, user_id: Uuid) -> PgResult<Vec<(Enrollment, Course)>> {
        let mut conn = self.client.get_connection().await?;
        conn.list_user_enrollments(user_id).await
    }

    async fn user_enrollment_statistics(&self, user_id: Uuid) -> PgResult<EnrollmentStatistics> {
        let mut conn = self.client.get_connection().await?;
        conn.user_enrollment_statistics(user_id).await
    }

    async fn count_active_enrollments(&self) -> PgResult<i64> {
        let mut conn = self.client.get_connection().await?;
        conn.count_active_enrollments().await
    }

    async fn create_ticket(&self, new_ticket: NewSupportTicket) -> PgResult<SupportTicket> {
        let mut conn = self.client.get_connection().await?;
        conn.create_ticket(new_ticket).await
    }

    async fn list_user_tickets(&self, user_id: Uuid) -> PgResult<Vec<SupportTicket>> {
        let mut conn = self.client.get_connection().await?;
        conn.list_user_tickets(user_id).await
    }

    async fn count_open_tickets(&self) -> PgResult<i64> {
        let mut conn = self.client.get_connection().await?;
        conn.count_open_tickets().await
    }
}
