//! Assessment authoring payloads.

use meta_postgres::model::NewAssessment;
use meta_postgres::types::AssessmentKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Maximum score used when the payload leaves it out.
const DEFAULT_MAX_SCORE: i32 = 100;

/// Payload for `POST /api/admin/courses/{courseId}/assessments`.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: Option<AssessmentKind>,
    #[validate(range(min = 1, max = 1000))]
    pub max_score: Option<i32>,
}

impl CreateAssessmentRequest {
    /// Converts into an assessment of `course_id`.
    pub fn into_model(self, course_id: Uuid) -> NewAssessment {
        NewAssessment {
            course_id,
            title: self.title,
            kind: self.kind.unwrap_or_default(),
            max_score: self.max_score.unwrap_or(DEFAULT_MAX_SCORE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_quiz_out_of_one_hundred() -> anyhow::Result<()> {
        let request: CreateAssessmentRequest = serde_json::from_str(r#"{"title":"Week 1"}"#)?;
        let assessment = request.into_model(Uuid::nil());

        assert_eq!(assessment.kind, AssessmentKind::Quiz);
        assert_eq!(assessment.max_score, DEFAULT_MAX_SCORE);
        Ok(())
    }

    #[test]
    fn reads_the_kind_from_type() -> anyhow::Result<()> {
        let request: CreateAssessmentRequest =
            serde_json::from_str(r#"{"title":"Final","type":"exam","maxScore":0}"#)?;

        assert_eq!(request.kind, Some(AssessmentKind::Exam));
        assert!(request.validate().is_err());
        Ok(())
    }
}
