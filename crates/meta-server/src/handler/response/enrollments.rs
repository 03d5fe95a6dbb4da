//! Enrollment response types.

use jiff::Timestamp;
use meta_postgres::model;
use meta_postgres::types::EnrollmentStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Course;

/// An enrollment, optionally with its course.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    pub progress_percentage: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Enrollment {
    pub fn from_model(enrollment: model::Enrollment) -> Self {
        Self {
            id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            status: enrollment.status,
            progress_percentage: enrollment.progress_percentage,
            course: None,
            created_at: enrollment.created_at.into(),
            updated_at: enrollment.updated_at.into(),
        }
    }

    pub fn with_course(enrollment: model::Enrollment, course: model::Course) -> Self {
        Self {
            course: Some(Course::from_model(course)),
            ..Self::from_model(enrollment)
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentEnvelope {
    pub enrollment: Enrollment,
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollments {
    pub enrollments: Vec<Enrollment>,
}

impl Enrollments {
    pub fn from_models(rows: Vec<(model::Enrollment, model::Course)>) -> Self {
        let enrollments = rows
            .into_iter()
            .map(|(enrollment, course)| Enrollment::with_course(enrollment, course))
            .collect();
        Self { enrollments }
    }
}
