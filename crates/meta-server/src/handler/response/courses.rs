//! Course response types.

use bigdecimal::BigDecimal;
use jiff::Timestamp;
use meta_postgres::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog course.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration_hours: Option<i32>,
    /// Serialized as a decimal string.
    pub price: Option<BigDecimal>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    pub fn from_model(course: model::Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            instructor: course.instructor,
            duration_hours: course.duration_hours,
            price: course.price,
            created_at: course.created_at.into(),
            updated_at: course.updated_at.into(),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseEnvelope {
    pub course: Course,
}

impl CourseEnvelope {
    pub fn from_model(course: model::Course) -> Self {
        Self {
            course: Course::from_model(course),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Courses {
    pub courses: Vec<Course>,
}

impl Courses {
    pub fn from_models(courses: Vec<model::Course>) -> Self {
        Self {
            courses: courses.into_iter().map(Course::from_model).collect(),
        }
    }
}
