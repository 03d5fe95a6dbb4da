//! Course module and lesson repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{CourseModule, Lesson, NewCourseModule, NewLesson};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for course structure operations.
pub trait CurriculumRepository {
    /// Adds a module to a course.
    ///
    /// Fails on `course_modules_course_id_fkey` if the course does not exist.
    fn create_course_module(
        &mut self,
        new_module: NewCourseModule,
    ) -> impl Future<Output = PgResult<CourseModule>> + Send;

    /// Lists a course's modules in display order.
    fn list_course_modules(
        &mut self,
        course_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<CourseModule>>> + Send;

    /// Adds a lesson to a module.
    ///
    /// Fails on `lessons_module_id_fkey` if the module does not exist.
    fn create_lesson(
        &mut self,
        new_lesson: NewLesson,
    ) -> impl Future<Output = PgResult<Lesson>> + Send;

    /// Lists the lessons of several modules at once, in display order.
    fn list_module_lessons(
        &mut self,
        module_ids: Vec<Uuid>,
    ) -> impl Future<Output = PgResult<Vec<Lesson>>> + Send;
}

impl CurriculumRepository for PgConnection {
    async fn create_course_module(
        &mut self,
        mut new_module: NewCourseModule,
    ) -> PgResult<CourseModule> {
        use schema::course_modules;

        new_module.title = new_module.title.trim().to_owned();

        diesel::insert_into(course_modules::table)
            .values(&new_module)
            .returning(CourseModule::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_course_modules(&mut self, course_id: Uuid) -> PgResult<Vec<CourseModule>> {
        use schema::course_modules::{self, dsl};

        course_modules::table
            .filter(dsl::course_id.eq(course_id))
            .order((dsl::position.asc(), dsl::created_at.asc()))
            .select(CourseModule::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn create_lesson(&mut self, mut new_lesson: NewLesson) -> PgResult<Lesson> {
        use schema::lessons;

        new_lesson.title = new_lesson.title.trim().to_owned();

        diesel::insert_into(lessons::table)
            .values(&new_lesson)
            .returning(Lesson::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_module_lessons(&mut self, module_ids: Vec<Uuid>) -> PgResult<Vec<Lesson>> {
        use schema::lessons::{self, dsl};

        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        lessons::table
            .filter(dsl::module_id.eq_any(module_ids))
            .order((dsl::position.asc(), dsl::created_at.asc()))
            .select(Lesson::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
