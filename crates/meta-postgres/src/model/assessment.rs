//! Assessments and students' graded attempts at them.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::{assessments, user_assessments};
use crate::types::{AssessmentKind, SubmissionStatus};

/// A quiz, assignment or exam attached to a course.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = assessments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Assessment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub kind: AssessmentKind,
    pub max_score: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a new assessment.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = assessments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAssessment {
    pub course_id: Uuid,
    pub title: String,
    pub kind: AssessmentKind,
    pub max_score: i32,
}

/// One student's attempt at an assessment.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = user_assessments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserAssessment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assessment_id: Uuid,
    pub status: SubmissionStatus,
    /// Set once graded.
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub graded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
