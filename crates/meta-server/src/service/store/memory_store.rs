//! In-memory store used by tests in place of Postgres.
//!
//! Mirrors the database behavior the HTTP layer depends on: trimming on
//! insert, the unique email and enrollment constraints, and the course and
//! module foreign keys. Violations surface as real [`PgError`] values carrying the
//! same constraint names as the migrations.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use meta_postgres::model::{
    Assessment, Course, CourseModule, Enrollment, Lesson, NewAssessment, NewCourse,
    NewCourseModule, NewEnrollment, NewLesson, NewSupportTicket, NewUser, SupportTicket,
    UpdateCourse, UpdateUser, User, UserAssessment,
};
use meta_postgres::query::{
    AssessmentStatistics, CourseAnalytics, EnrollmentStatistics, UserStatistics,
};
use meta_postgres::types::{EnrollmentStatus, OffsetPagination, SubmissionStatus, TicketStatus};
use meta_postgres::{PgError, PgResult};
use uuid::Uuid;

use super::{CatalogStore, IdentityStore};

#[derive(Debug)]
struct ConstraintInfo {
    constraint: &'static str,
}

impl DatabaseErrorInformation for ConstraintInfo {
    fn message(&self) -> &str {
        "constraint violation"
    }

    fn details(&self) -> Option<&str> {
        None
    }

    fn hint(&self) -> Option<&str> {
        None
    }

    fn table_name(&self) -> Option<&str> {
        None
    }

    fn column_name(&self) -> Option<&str> {
        None
    }

    fn constraint_name(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn statement_position(&self) -> Option<i32> {
        None
    }
}

fn violation(kind: DatabaseErrorKind, constraint: &'static str) -> PgError {
    PgError::Query(DieselError::DatabaseError(
        kind,
        Box::new(ConstraintInfo { constraint }),
    ))
}

fn now() -> jiff_diesel::Timestamp {
    jiff::Timestamp::now().into()
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    tickets: Vec<SupportTicket>,
    modules: Vec<CourseModule>,
    lessons: Vec<Lesson>,
    assessments: Vec<Assessment>,
    submissions: Vec<UserAssessment>,
}

impl Tables {
    fn has_course(&self, course_id: Uuid) -> bool {
        self.courses.iter().any(|course| course.id == course_id)
    }
}

/// Shared in-memory tables; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a user's attempt at an assessment; there is no HTTP route for
    /// submissions.
    pub fn record_submission(
        &self,
        user_id: Uuid,
        assessment_id: Uuid,
        status: SubmissionStatus,
        score: Option<i32>,
    ) -> UserAssessment {
        let submission = UserAssessment {
            id: Uuid::new_v4(),
            user_id,
            assessment_id,
            status,
            score,
            feedback: None,
            submitted_at: Some(now()),
            graded_at: status.is_graded().then(now),
            created_at: now(),
            updated_at: now(),
        };

        self.tables().submissions.push(submission.clone());
        submission
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> PgResult<User> {
        let mut tables = self.tables();
        let email = new_user.email.trim().to_owned();

        if tables.users.iter().any(|user| user.email == email) {
            return Err(violation(
                DatabaseErrorKind::UniqueViolation,
                "users_email_unique_idx",
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            email,
            display_name: trimmed(new_user.display_name),
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: true,
            avatar_url: None,
            created_at: now(),
            updated_at: now(),
        };

        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> PgResult<Option<User>> {
        let tables = self.tables();
        Ok(tables.users.iter().find(|user| user.id == user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> PgResult<Option<User>> {
        let tables = self.tables();
        let email = email.trim();
        Ok(tables.users.iter().find(|user| user.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> PgResult<bool> {
        let tables = self.tables();
        let email = email.trim();
        Ok(tables.users.iter().any(|user| user.email == email))
    }

    async fn update_user(&self, user_id: Uuid, updates: UpdateUser) -> PgResult<Option<User>> {
        let mut tables = self.tables();
        let Some(user) = tables.users.iter_mut().find(|user| user.id == user_id) else {
            return Ok(None);
        };

        if let Some(display_name) = updates.display_name {
            user.display_name = trimmed(display_name);
        }
        if let Some(role) = updates.role {
            user.role = role;
        }
        if let Some(is_active) = updates.is_active {
            user.is_active = is_active;
        }
        if let Some(avatar_url) = updates.avatar_url {
            user.avatar_url = trimmed(avatar_url);
        }
        user.updated_at = now();

        Ok(Some(user.clone()))
    }

    async fn list_users(&self, pagination: OffsetPagination) -> PgResult<Vec<User>> {
        let tables = self.tables();
        Ok(tables
            .users
            .iter()
            .rev()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect())
    }

    async fn user_statistics(&self) -> PgResult<UserStatistics> {
        let tables = self.tables();
        Ok(UserStatistics {
            total: tables.users.len() as i64,
            active: tables.users.iter().filter(|user| user.is_active).count() as i64,
        })
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn create_course(&self, new_course: NewCourse) -> PgResult<Course> {
        let mut tables = self.tables();
        let course = Course {
            id: Uuid::new_v4(),
            title: new_course.title.trim().to_owned(),
            description: new_course.description,
            instructor: new_course.instructor,
            duration_hours: new_course.duration_hours,
            price: new_course.price,
            created_at: now(),
            updated_at: now(),
        };

        tables.courses.push(course.clone());
        Ok(course)
    }

    async fn find_course_by_id(&self, course_id: Uuid) -> PgResult<Option<Course>> {
        let tables = self.tables();
        Ok(tables
            .courses
            .iter()
            .find(|course| course.id == course_id)
            .cloned())
    }

    async fn list_courses(&self, pagination: OffsetPagination) -> PgResult<Vec<Course>> {
        let tables = self.tables();
        Ok(tables
            .courses
            .iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect())
    }

    async fn update_course(
        &self,
        course_id: Uuid,
        updates: UpdateCourse,
    ) -> PgResult<Option<Course>> {
        let mut tables = self.tables();
        let Some(course) = tables.courses.iter_mut().find(|course| course.id == course_id) else {
            return Ok(None);
        };

        if let Some(title) = updates.title {
            course.title = title.trim().to_owned();
        }
        if let Some(description) = updates.description {
            course.description = description;
        }
        if let Some(instructor) = updates.instructor {
            course.instructor = instructor;
        }
        if let Some(duration_hours) = updates.duration_hours {
            course.duration_hours = duration_hours;
        }
        if let Some(price) = updates.price {
            course.price = price;
        }
        course.updated_at = now();

        Ok(Some(course.clone()))
    }

    async fn count_courses(&self) -> PgResult<i64> {
        Ok(self.tables().courses.len() as i64)
    }

    async fn course_analytics(&self, course_id: Uuid) -> PgResult<CourseAnalytics> {
        let tables = self.tables();

        let enrollment_rows = tables
            .enrollments
            .iter()
            .filter(|enrollment| enrollment.course_id == course_id)
            .map(|enrollment| (enrollment.status, enrollment.progress_percentage));

        let assessment_ids: Vec<Uuid> = tables
            .assessments
            .iter()
            .filter(|assessment| assessment.course_id == course_id)
            .map(|assessment| assessment.id)
            .collect();
        let submission_rows = tables
            .submissions
            .iter()
            .filter(|submission| assessment_ids.contains(&submission.assessment_id))
            .map(|submission| (submission.status, submission.score));

        let module_ids: Vec<Uuid> = tables
            .modules
            .iter()
            .filter(|module| module.course_id == course_id)
            .map(|module| module.id)
            .collect();
        let lessons = tables
            .lessons
            .iter()
            .filter(|lesson| module_ids.contains(&lesson.module_id))
            .count();

        Ok(CourseAnalytics {
            enrollments: EnrollmentStatistics::from_rows(enrollment_rows),
            submissions: AssessmentStatistics::from_rows(submission_rows),
            modules: module_ids.len() as i64,
            lessons: lessons as i64,
            assessments: assessment_ids.len() as i64,
        })
    }

    async fn create_course_module(&self, new_module: NewCourseModule) -> PgResult<CourseModule> {
        let mut tables = self.tables();

        if !tables.has_course(new_module.course_id) {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "course_modules_course_id_fkey",
            ));
        }

        let module = CourseModule {
            id: Uuid::new_v4(),
            course_id: new_module.course_id,
            title: new_module.title.trim().to_owned(),
            description: new_module.description,
            position: new_module.position,
            created_at: now(),
            updated_at: now(),
        };

        tables.modules.push(module.clone());
        Ok(module)
    }

    async fn list_course_modules(&self, course_id: Uuid) -> PgResult<Vec<CourseModule>> {
        let tables = self.tables();
        let mut modules: Vec<CourseModule> = tables
            .modules
            .iter()
            .filter(|module| module.course_id == course_id)
            .cloned()
            .collect();

        modules.sort_by_key(|module| module.position);
        Ok(modules)
    }

    async fn create_lesson(&self, new_lesson: NewLesson) -> PgResult<Lesson> {
        let mut tables = self.tables();

        if !tables
            .modules
            .iter()
            .any(|module| module.id == new_lesson.module_id)
        {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "lessons_module_id_fkey",
            ));
        }

        let lesson = Lesson {
            id: Uuid::new_v4(),
            module_id: new_lesson.module_id,
            title: new_lesson.title.trim().to_owned(),
            content: new_lesson.content,
            video_url: new_lesson.video_url,
            duration_minutes: new_lesson.duration_minutes,
            position: new_lesson.position,
            created_at: now(),
            updated_at: now(),
        };

        tables.lessons.push(lesson.clone());
        Ok(lesson)
    }

    async fn list_module_lessons(&self, module_ids: Vec<Uuid>) -> PgResult<Vec<Lesson>> {
        let tables = self.tables();
        let mut lessons: Vec<Lesson> = tables
            .lessons
            .iter()
            .filter(|lesson| module_ids.contains(&lesson.module_id))
            .cloned()
            .collect();

        lessons.sort_by_key(|lesson| lesson.position);
        Ok(lessons)
    }

    async fn create_assessment(&self, new_assessment: NewAssessment) -> PgResult<Assessment> {
        let mut tables = self.tables();

        if !tables.has_course(new_assessment.course_id) {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "assessments_course_id_fkey",
            ));
        }

        let assessment = Assessment {
            id: Uuid::new_v4(),
            course_id: new_assessment.course_id,
            title: new_assessment.title.trim().to_owned(),
            kind: new_assessment.kind,
            max_score: new_assessment.max_score,
            created_at: now(),
            updated_at: now(),
        };

        tables.assessments.push(assessment.clone());
        Ok(assessment)
    }

    async fn list_user_assessments(
        &self,
        user_id: Uuid,
    ) -> PgResult<Vec<(UserAssessment, Assessment, Course)>> {
        let tables = self.tables();
        Ok(tables
            .submissions
            .iter()
            .rev()
            .filter(|submission| submission.user_id == user_id)
            .filter_map(|submission| {
                let assessment = tables
                    .assessments
                    .iter()
                    .find(|assessment| assessment.id == submission.assessment_id)?;
                let course = tables
                    .courses
                    .iter()
                    .find(|course| course.id == assessment.course_id)?;
                Some((submission.clone(), assessment.clone(), course.clone()))
            })
            .collect())
    }

    async fn user_assessment_statistics(&self, user_id: Uuid) -> PgResult<AssessmentStatistics> {
        let tables = self.tables();
        let rows = tables
            .submissions
            .iter()
            .filter(|submission| submission.user_id == user_id)
            .map(|submission| (submission.status, submission.score));

        Ok(AssessmentStatistics::from_rows(rows))
    }

    async fn create_enrollment(&self, new_enrollment: NewEnrollment) -> PgResult<Enrollment> {
        let mut tables = self.tables();

        if !tables.has_course(new_enrollment.course_id) {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "enrollments_course_id_fkey",
            ));
        }

        if tables.enrollments.iter().any(|enrollment| {
            enrollment.user_id == new_enrollment.user_id
                && enrollment.course_id == new_enrollment.course_id
        }) {
            return Err(violation(
                DatabaseErrorKind::UniqueViolation,
                "enrollments_user_course_unique_idx",
            ));
        }

        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            user_id: new_enrollment.user_id,
            course_id: new_enrollment.course_id,
            status: EnrollmentStatus::Active,
            progress_percentage: 0,
            created_at: now(),
            updated_at: now(),
        };

        tables.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn list_user_enrollments(&self, user_id: Uuid) -> PgResult<Vec<(Enrollment, Course)>> {
        let tables = self.tables();
        Ok(tables
            .enrollments
            .iter()
            .filter(|enrollment| enrollment.user_id == user_id)
            .filter_map(|enrollment| {
                tables
                    .courses
                    .iter()
                    .find(|course| course.id == enrollment.course_id)
                    .map(|course| (enrollment.clone(), course.clone()))
            })
            .collect())
    }

    async fn user_enrollment_statistics(&self, user_id: Uuid) -> PgResult<EnrollmentStatistics> {
        let tables = self.tables();
        let rows = tables
            .enrollments
            .iter()
            .filter(|enrollment| enrollment.user_id == user_id)
            .map(|enrollment| (enrollment.status, enrollment.progress_percentage));

        Ok(EnrollmentStatistics::from_rows(rows))
    }

    async fn count_active_enrollments(&self) -> PgResult<i64> {
        let tables = self.tables();
        Ok(tables
            .enrollments
            .iter()
            .filter(|enrollment| enrollment.status == EnrollmentStatus::Active)
            .count() as i64)
    }

    async fn create_ticket(&self, new_ticket: NewSupportTicket) -> PgResult<SupportTicket> {
        let mut tables = self.tables();
        let ticket = SupportTicket {
            id: Uuid::new_v4(),
            user_id: new_ticket.user_id,
            subject: new_ticket.subject.trim().to_owned(),
            message: new_ticket.message.trim().to_owned(),
            status: TicketStatus::Open,
            priority: new_ticket.priority,
            created_at: now(),
            updated_at: now(),
        };

        tables.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn list_user_tickets(&self, user_id: Uuid) -> PgResult<Vec<SupportTicket>> {
        let tables = self.tables();
        Ok(tables
            .tickets
            .iter()
            .rev()
            .filter(|ticket| ticket.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_open_tickets(&self) -> PgResult<i64> {
        let tables = self.tables();
        Ok(tables
            .tickets
            .iter()
            .filter(|ticket| ticket.status.is_open())
            .count() as i64)
    }
}
