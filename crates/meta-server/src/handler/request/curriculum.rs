//! Course structure payloads.

use meta_postgres::model::{NewCourseModule, NewLesson};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Payload for `POST /api/admin/courses/{courseId}/modules`.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    /// Defaults to the front of the course.
    #[validate(range(min = 0))]
    pub position: Option<i32>,
}

impl CreateModuleRequest {
    /// Converts into a module of `course_id`.
    pub fn into_model(self, course_id: Uuid) -> NewCourseModule {
        NewCourseModule {
            course_id,
            title: self.title,
            description: self.description,
            position: self.position.unwrap_or_default(),
        }
    }
}

/// Payload for `POST /api/admin/modules/{moduleId}/lessons`.
///
/// Video files are hosted elsewhere; only their URL is stored.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 50_000))]
    pub content: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 0))]
    pub position: Option<i32>,
}

impl CreateLessonRequest {
    /// Converts into a lesson of `module_id`.
    pub fn into_model(self, module_id: Uuid) -> NewLesson {
        NewLesson {
            module_id,
            title: self.title,
            content: self.content,
            video_url: self.video_url,
            duration_minutes: self.duration_minutes,
            position: self.position.unwrap_or_default(),
        }
    }
}
