//! Dashboard statistics.

use meta_postgres::query::{AssessmentStatistics, CourseAnalytics, EnrollmentStatistics};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Learning progress of one user.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_enrollments: i64,
    pub active_enrollments: i64,
    pub completed_enrollments: i64,
    /// Mean progress over non-cancelled enrollments, in percent.
    pub average_progress: f64,
    pub total_assessments: i64,
    pub graded_assessments: i64,
    /// Mean recorded score.
    pub average_score: f64,
}

impl UserStats {
    pub fn from_statistics(
        enrollments: EnrollmentStatistics,
        assessments: AssessmentStatistics,
    ) -> Self {
        Self {
            total_enrollments: enrollments.total,
            active_enrollments: enrollments.active,
            completed_enrollments: enrollments.completed,
            average_progress: enrollments.average_progress,
            total_assessments: assessments.total,
            graded_assessments: assessments.graded,
            average_score: assessments.average_score,
        }
    }
}

/// Enrollment, structure and grading figures for one course.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAnalyticsSummary {
    pub course_id: Uuid,
    pub total_enrollments: i64,
    pub active_enrollments: i64,
    pub completed_enrollments: i64,
    pub average_progress: f64,
    pub total_modules: i64,
    pub total_lessons: i64,
    pub total_assessments: i64,
    pub total_submissions: i64,
    pub graded_submissions: i64,
    pub average_score: f64,
}

impl CourseAnalyticsSummary {
    pub fn new(course_id: Uuid, analytics: CourseAnalytics) -> Self {
        Self {
            course_id,
            total_enrollments: analytics.enrollments.total,
            active_enrollments: analytics.enrollments.active,
            completed_enrollments: analytics.enrollments.completed,
            average_progress: analytics.enrollments.average_progress,
            total_modules: analytics.modules,
            total_lessons: analytics.lessons,
            total_assessments: analytics.assessments,
            total_submissions: analytics.submissions.total,
            graded_submissions: analytics.submissions.graded,
            average_score: analytics.submissions.average_score,
        }
    }
}

/// `{ "analytics": ... }` envelope.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEnvelope {
    pub analytics: CourseAnalyticsSummary,
}

/// Platform-wide counters for the back office.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub active_users: i64,
    pub total_courses: i64,
    pub active_enrollments: i64,
    pub open_tickets: i64,
}

/// `{ "stats": ... }` envelope.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEnvelope<T> {
    pub stats: T,
}
