//! Assessment repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Assessment, Course, NewAssessment, UserAssessment};
use crate::types::SubmissionStatus;
use crate::{PgConnection, PgError, PgResult, schema};

/// Summary of a set of submissions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AssessmentStatistics {
    pub total: i64,
    pub graded: i64,
    /// Mean of the recorded scores, 0 when nothing is scored yet.
    pub average_score: f64,
}

impl AssessmentStatistics {
    /// Folds `(status, score)` pairs into a summary.
    pub fn from_rows(rows: impl IntoIterator<Item = (SubmissionStatus, Option<i32>)>) -> Self {
        let mut stats = Self::default();
        let mut score_sum = 0i64;
        let mut score_count = 0i64;

        for (status, score) in rows {
            stats.total += 1;
            if status.is_graded() {
                stats.graded += 1;
            }
            if let Some(score) = score {
                score_sum += i64::from(score);
                score_count += 1;
            }
        }

        if score_count > 0 {
            stats.average_score = score_sum as f64 / score_count as f64;
        }

        stats
    }
}

/// Repository for assessment database operations.
pub trait AssessmentRepository {
    /// Attaches an assessment to a course.
    ///
    /// Fails on `assessments_course_id_fkey` if the course does not exist.
    fn create_assessment(
        &mut self,
        new_assessment: NewAssessment,
    ) -> impl Future<Output = PgResult<Assessment>> + Send;

    /// Lists a user's submissions with their assessment and course, newest
    /// first.
    fn list_user_assessments(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<(UserAssessment, Assessment, Course)>>> + Send;

    /// Summarizes a user's submissions.
    fn user_assessment_statistics(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<AssessmentStatistics>> + Send;
}

impl AssessmentRepository for PgConnection {
    async fn create_assessment(
        &mut self,
        mut new_assessment: NewAssessment,
    ) -> PgResult<Assessment> {
        use schema::assessments;

        new_assessment.title = new_assessment.title.trim().to_owned();

        diesel::insert_into(assessments::table)
            .values(&new_assessment)
            .returning(Assessment::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_user_assessments(
        &mut self,
        user_id: Uuid,
    ) -> PgResult<Vec<(UserAssessment, Assessment, Course)>> {
        use schema::{assessments, courses, user_assessments};

        user_assessments::table
            .inner_join(assessments::table.inner_join(courses::table))
            .filter(user_assessments::user_id.eq(user_id))
            .order(user_assessments::created_at.desc())
            .select((
                UserAssessment::as_select(),
                Assessment::as_select(),
                Course::as_select(),
            ))
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn user_assessment_statistics(
        &mut self,
        user_id: Uuid,
    ) -> PgResult<AssessmentStatistics> {
        use schema::user_assessments::{self, dsl};

        let rows: Vec<(SubmissionStatus, Option<i32>)> = user_assessments::table
            .filter(dsl::user_id.eq(user_id))
            .select((dsl::status, dsl::score))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(AssessmentStatistics::from_rows(rows))
    }
}
