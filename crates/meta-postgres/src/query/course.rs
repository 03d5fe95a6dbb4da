//! Course repository for the public catalog and its authoring.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use super::{AssessmentStatistics, EnrollmentStatistics};
use crate::model::{Course, NewCourse, UpdateCourse};
use crate::types::{EnrollmentStatus, OffsetPagination, SubmissionStatus};
use crate::{PgConnection, PgError, PgResult, schema};

/// Per-course figures for the back office.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CourseAnalytics {
    pub enrollments: EnrollmentStatistics,
    pub submissions: AssessmentStatistics,
    pub modules: i64,
    pub lessons: i64,
    pub assessments: i64,
}

/// Repository for course database operations.
pub trait CourseRepository {
    /// Inserts a new course.
    fn create_course(
        &mut self,
        new_course: NewCourse,
    ) -> impl Future<Output = PgResult<Course>> + Send;

    /// Finds a course by its unique identifier.
    fn find_course_by_id(
        &mut self,
        course_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Course>>> + Send;

    /// Lists courses, most recently created first.
    fn list_courses(
        &mut self,
        pagination: OffsetPagination,
    ) -> impl Future<Output = PgResult<Vec<Course>>> + Send;

    /// Applies a partial update. Returns `None` if the course does not exist.
    fn update_course(
        &mut self,
        course_id: Uuid,
        updates: UpdateCourse,
    ) -> impl Future<Output = PgResult<Option<Course>>> + Send;

    /// Counts all courses.
    fn count_courses(&mut self) -> impl Future<Output = PgResult<i64>> + Send;

    /// Aggregates enrollment, structure and grading figures for one course.
    ///
    /// An unknown course yields all-zero analytics; callers check existence.
    fn course_analytics(
        &mut self,
        course_id: Uuid,
    ) -> impl Future<Output = PgResult<CourseAnalytics>> + Send;
}

impl CourseRepository for PgConnection {
    async fn create_course(&mut self, mut new_course: NewCourse) -> PgResult<Course> {
        use schema::courses;

        new_course.title = new_course.title.trim().to_owned();

        diesel::insert_into(courses::table)
            .values(&new_course)
            .returning(Course::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_course_by_id(&mut self, course_id: Uuid) -> PgResult<Option<Course>> {
        use schema::courses::{self, dsl};

        courses::table
            .filter(dsl::id.eq(course_id))
            .select(Course::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_courses(&mut self, pagination: OffsetPagination) -> PgResult<Vec<Course>> {
        use schema::courses::{self, dsl};

        courses::table
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Course::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_course(
        &mut self,
        course_id: Uuid,
        mut updates: UpdateCourse,
    ) -> PgResult<Option<Course>> {
        use schema::courses::{self, dsl};

        updates.title = updates.title.map(|t| t.trim().to_owned());
        updates.updated_at = Some(Timestamp::now().into());

        diesel::update(courses::table.filter(dsl::id.eq(course_id)))
            .set(&updates)
            .returning(Course::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn count_courses(&mut self) -> PgResult<i64> {
        use schema::courses;

        courses::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn course_analytics(&mut self, course_id: Uuid) -> PgResult<CourseAnalytics> {
        use schema::{assessments, course_modules, enrollments, lessons, user_assessments};

        let enrollment_rows: Vec<(EnrollmentStatus, i32)> = enrollments::table
            .filter(enrollments::course_id.eq(course_id))
            .select((enrollments::status, enrollments::progress_percentage))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let submission_rows: Vec<(SubmissionStatus, Option<i32>)> = user_assessments::table
            .inner_join(assessments::table)
            .filter(assessments::course_id.eq(course_id))
            .select((user_assessments::status, user_assessments::score))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let modules = course_modules::table
            .filter(course_modules::course_id.eq(course_id))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let lesson_count = lessons::table
            .inner_join(course_modules::table)
            .filter(course_modules::course_id.eq(course_id))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let assessment_count = assessments::table
            .filter(assessments::course_id.eq(course_id))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(CourseAnalytics {
            enrollments: EnrollmentStatistics::from_rows(enrollment_rows),
            submissions: AssessmentStatistics::from_rows(submission_rows),
            modules,
            lessons: lesson_count,
            assessments: assessment_count,
        })
    }
}
