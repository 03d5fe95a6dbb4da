//! Course structure response types.

use jiff::Timestamp;
use meta_postgres::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Course;

/// A section of a course.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CourseModule {
    pub fn from_model(module: model::CourseModule) -> Self {
        Self {
            id: module.id,
            course_id: module.course_id,
            title: module.title,
            description: module.description,
            position: module.position,
            created_at: module.created_at.into(),
            updated_at: module.updated_at.into(),
        }
    }
}

/// A lesson inside a module.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lesson {
    pub fn from_model(lesson: model::Lesson) -> Self {
        Self {
            id: lesson.id,
            module_id: lesson.module_id,
            title: lesson.title,
            content: lesson.content,
            video_url: lesson.video_url,
            duration_minutes: lesson.duration_minutes,
            position: lesson.position,
            created_at: lesson.created_at.into(),
            updated_at: lesson.updated_at.into(),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEnvelope {
    pub module: CourseModule,
}

impl ModuleEnvelope {
    pub fn from_model(module: model::CourseModule) -> Self {
        Self {
            module: CourseModule::from_model(module),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseModules {
    pub modules: Vec<CourseModule>,
}

impl CourseModules {
    pub fn from_models(modules: Vec<model::CourseModule>) -> Self {
        Self {
            modules: modules.into_iter().map(CourseModule::from_model).collect(),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonEnvelope {
    pub lesson: Lesson,
}

impl LessonEnvelope {
    pub fn from_model(lesson: model::Lesson) -> Self {
        Self {
            lesson: Lesson::from_model(lesson),
        }
    }
}

/// A module with its lessons in display order.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleWithLessons {
    #[serde(flatten)]
    pub module: CourseModule,
    pub lessons: Vec<Lesson>,
}

/// A course with its full outline, as shown on the public course page.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<ModuleWithLessons>,
}

impl CourseDetail {
    /// Groups `lessons` under their modules, keeping both orders.
    pub fn from_models(
        course: model::Course,
        modules: Vec<model::CourseModule>,
        lessons: Vec<model::Lesson>,
    ) -> Self {
        let mut modules: Vec<ModuleWithLessons> = modules
            .into_iter()
            .map(|module| ModuleWithLessons {
                module: CourseModule::from_model(module),
                lessons: Vec::new(),
            })
            .collect();

        for lesson in lessons {
            if let Some(module) = modules
                .iter_mut()
                .find(|entry| entry.module.id == lesson.module_id)
            {
                module.lessons.push(Lesson::from_model(lesson));
            }
        }

        Self {
            course: Course::from_model(course),
            modules,
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetailEnvelope {
    pub course: CourseDetail,
}
