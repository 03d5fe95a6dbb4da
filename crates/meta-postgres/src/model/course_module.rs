//! Course structure: modules and the lessons inside them.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::{course_modules, lessons};

/// An ordered section of a course.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = course_modules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Sort key within the course, ascending.
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a new module.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = course_modules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCourseModule {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
}

/// A single lesson within a module.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Lesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    /// Sort key within the module, ascending.
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a new lesson.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewLesson {
    pub module_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub position: i32,
}
