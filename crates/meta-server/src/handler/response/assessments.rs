//! Assessment response types.

use jiff::Timestamp;
use meta_postgres::model;
use meta_postgres::types::{AssessmentKind, SubmissionStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An assessment attached to a course.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    pub max_score: i32,
    pub created_at: Timestamp,
}

impl Assessment {
    pub fn from_model(assessment: model::Assessment) -> Self {
        Self {
            id: assessment.id,
            course_id: assessment.course_id,
            title: assessment.title,
            kind: assessment.kind,
            max_score: assessment.max_score,
            created_at: assessment.created_at.into(),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentEnvelope {
    pub assessment: Assessment,
}

impl AssessmentEnvelope {
    pub fn from_model(assessment: model::Assessment) -> Self {
        Self {
            assessment: Assessment::from_model(assessment),
        }
    }
}

/// A student's attempt, flattened with its assessment and course titles.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssessment {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    pub course_id: Uuid,
    pub course_title: String,
    pub status: SubmissionStatus,
    pub score: Option<i32>,
    pub max_score: i32,
    pub feedback: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub graded_at: Option<Timestamp>,
}

impl UserAssessment {
    pub fn from_models(
        submission: model::UserAssessment,
        assessment: model::Assessment,
        course: model::Course,
    ) -> Self {
        Self {
            id: submission.id,
            assessment_id: assessment.id,
            title: assessment.title,
            kind: assessment.kind,
            course_id: course.id,
            course_title: course.title,
            status: submission.status,
            score: submission.score,
            max_score: assessment.max_score,
            feedback: submission.feedback,
            submitted_at: submission.submitted_at.map(Into::into),
            graded_at: submission.graded_at.map(Into::into),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAssessments {
    pub assessments: Vec<UserAssessment>,
}

impl UserAssessments {
    pub fn from_models(
        rows: Vec<(model::UserAssessment, model::Assessment, model::Course)>,
    ) -> Self {
        Self {
            assessments: rows
                .into_iter()
                .map(|(submission, assessment, course)| {
                    UserAssessment::from_models(submission, assessment, course)
                })
                .collect(),
        }
    }
}
