//! Enrollment repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Course, Enrollment, NewEnrollment};
use crate::types::EnrollmentStatus;
use crate::{PgConnection, PgError, PgResult, schema};

/// Per-user enrollment summary.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EnrollmentStatistics {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
    /// Mean progress across non-cancelled enrollments, 0 when there are none.
    pub average_progress: f64,
}

impl EnrollmentStatistics {
    /// Folds `(status, progress)` pairs into a summary.
    pub fn from_rows(rows: impl IntoIterator<Item = (EnrollmentStatus, i32)>) -> Self {
        let mut stats = Self::default();
        let mut progress_sum = 0i64;
        let mut progress_count = 0i64;

        for (status, progress) in rows {
            stats.total += 1;
            match status {
                EnrollmentStatus::Active => stats.active += 1,
                EnrollmentStatus::Completed => stats.completed += 1,
                EnrollmentStatus::Cancelled => continue,
            }
            progress_sum += i64::from(progress);
            progress_count += 1;
        }

        if progress_count > 0 {
            stats.average_progress = progress_sum as f64 / progress_count as f64;
        }

        stats
    }
}

/// Repository for enrollment database operations.
pub trait EnrollmentRepository {
    /// Enrolls a user in a course.
    ///
    /// Fails on `enrollments_user_course_unique_idx` if already enrolled and
    /// on `enrollments_course_id_fkey` if the course does not exist.
    fn create_enrollment(
        &mut self,
        new_enrollment: NewEnrollment,
    ) -> impl Future<Output = PgResult<Enrollment>> + Send;

    /// Lists a user's enrollments together with their courses.
    fn list_user_enrollments(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<(Enrollment, Course)>>> + Send;

    /// Summarizes a user's enrollments.
    fn user_enrollment_statistics(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<EnrollmentStatistics>> + Send;

    /// Counts active enrollments across the platform.
    fn count_active_enrollments(&mut self) -> impl Future<Output = PgResult<i64>> + Send;
}

impl EnrollmentRepository for PgConnection {
    async fn create_enrollment(&mut self, new_enrollment: NewEnrollment) -> PgResult<Enrollment> {
        use schema::enrollments;

        diesel::insert_into(enrollments::table)
            .values(&new_enrollment)
            .returning(Enrollment::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_user_enrollments(&mut self, user_id: Uuid) -> PgResult<Vec<(Enrollment, Course)>> {
        use schema::{courses, enrollments};

        enrollments::table
            .inner_join(courses::table)
            .filter(enrollments::user_id.eq(user_id))
            .order(enrollments::created_at.desc())
            .select((Enrollment::as_select(), Course::as_select()))
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn user_enrollment_statistics(&mut self, user_id: Uuid) -> PgResult<EnrollmentStatistics> {
        use schema::enrollments::{self, dsl};

        let rows: Vec<(EnrollmentStatus, i32)> = enrollments::table
            .filter(dsl::user_id.eq(user_id))
            .select((dsl::status, dsl::progress_percentage))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(EnrollmentStatistics::from_rows(rows))
    }

    async fn count_active_enrollments(&mut self) -> PgResult<i64> {
        use schema::enrollments::{self, dsl};

        enrollments::table
            .filter(dsl::status.eq(EnrollmentStatus::Active))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_skip_cancelled_progress() {
        let stats = EnrollmentStatistics::from_rows([
            (EnrollmentStatus::Active, 40),
            (EnrollmentStatus::Completed, 100),
            (EnrollmentStatus::Cancelled, 10),
        ]);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.completed, 1);
        assert!((stats.average_progress - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn statistics_of_nothing() {
        let stats = EnrollmentStatistics::from_rows([]);
        assert_eq!(stats, EnrollmentStatistics::default());
    }
}
