//! Database error to HTTP error conversion.
//!
//! Constraint violations carry meaning (a lost registration race, a duplicate
//! enrollment) and map to client errors. Everything else is logged and
//! surfaces as a generic server error without leaking database details.

use meta_postgres::PgError;
use meta_postgres::types::{
    AssessmentConstraints, ConstraintViolation, CourseConstraints, CourseModuleConstraints,
    EnrollmentConstraints, LessonConstraints, SupportTicketConstraints,
    UserAssessmentConstraints, UserConstraints,
};

use crate::handler::{Error, ErrorKind};

/// Tracing target for database error conversion.
const TRACING_TARGET: &str = "meta_server::handler::postgres";

impl From<UserConstraints> for Error<'static> {
    fn from(constraint: UserConstraints) -> Self {
        match constraint {
            UserConstraints::EmailUnique => ErrorKind::EmailTaken.into_error(),
            UserConstraints::EmailNotEmpty => ErrorKind::ValidationError
                .with_context("Email cannot be empty")
                .with_resource("user"),
            UserConstraints::DisplayNameLengthMax => ErrorKind::ValidationError
                .with_context("Name is too long")
                .with_resource("user"),
            UserConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
        }
    }
}

impl From<CourseConstraints> for Error<'static> {
    fn from(constraint: CourseConstraints) -> Self {
        let context = match constraint {
            CourseConstraints::TitleNotEmpty => "Course title cannot be empty",
            CourseConstraints::DurationPositive => "Course duration must be positive",
            CourseConstraints::PriceNonNegative => "Course price cannot be negative",
        };

        ErrorKind::ValidationError
            .with_context(context)
            .with_resource("course")
    }
}

impl From<EnrollmentConstraints> for Error<'static> {
    fn from(constraint: EnrollmentConstraints) -> Self {
        match constraint {
            EnrollmentConstraints::UserCourseUnique => ErrorKind::Conflict
                .with_context("Already enrolled in this course")
                .with_resource("enrollment"),
            EnrollmentConstraints::CourseReference => ErrorKind::NotFound
                .with_context("Course not found")
                .with_resource("course"),
            EnrollmentConstraints::UserReference => ErrorKind::StaleIdentity.into_error(),
            EnrollmentConstraints::ProgressRange => ErrorKind::ValidationError
                .with_context("Progress must be between 0 and 100")
                .with_resource("enrollment"),
        }
    }
}

impl From<SupportTicketConstraints> for Error<'static> {
    fn from(constraint: SupportTicketConstraints) -> Self {
        match constraint {
            SupportTicketConstraints::SubjectNotEmpty => ErrorKind::ValidationError
                .with_context("Subject cannot be empty")
                .with_resource("support_ticket"),
            SupportTicketConstraints::MessageNotEmpty => ErrorKind::ValidationError
                .with_context("Message cannot be empty")
                .with_resource("support_ticket"),
            SupportTicketConstraints::UserReference => ErrorKind::StaleIdentity.into_error(),
        }
    }
}

impl From<CourseModuleConstraints> for Error<'static> {
    fn from(constraint: CourseModuleConstraints) -> Self {
        match constraint {
            CourseModuleConstraints::CourseReference => ErrorKind::NotFound
                .with_context("Course not found")
                .with_resource("course"),
            CourseModuleConstraints::TitleNotEmpty => ErrorKind::ValidationError
                .with_context("Module title cannot be empty")
                .with_resource("module"),
            CourseModuleConstraints::PositionNonNegative => ErrorKind::ValidationError
                .with_context("Module position cannot be negative")
                .with_resource("module"),
        }
    }
}

impl From<LessonConstraints> for Error<'static> {
    fn from(constraint: LessonConstraints) -> Self {
        let context = match constraint {
            LessonConstraints::ModuleReference => {
                return ErrorKind::NotFound
                    .with_context("Module not found")
                    .with_resource("module");
            }
            LessonConstraints::TitleNotEmpty => "Lesson title cannot be empty",
            LessonConstraints::DurationPositive => "Lesson duration must be positive",
            LessonConstraints::PositionNonNegative => "Lesson position cannot be negative",
        };

        ErrorKind::ValidationError
            .with_context(context)
            .with_resource("lesson")
    }
}

impl From<AssessmentConstraints> for Error<'static> {
    fn from(constraint: AssessmentConstraints) -> Self {
        match constraint {
            AssessmentConstraints::CourseReference => ErrorKind::NotFound
                .with_context("Course not found")
                .with_resource("course"),
            AssessmentConstraints::TitleNotEmpty => ErrorKind::ValidationError
                .with_context("Assessment title cannot be empty")
                .with_resource("assessment"),
            AssessmentConstraints::MaxScorePositive => ErrorKind::ValidationError
                .with_context("Maximum score must be positive")
                .with_resource("assessment"),
        }
    }
}

impl From<UserAssessmentConstraints> for Error<'static> {
    fn from(constraint: UserAssessmentConstraints) -> Self {
        match constraint {
            UserAssessmentConstraints::UserAssessmentUnique => ErrorKind::Conflict
                .with_context("Assessment already attempted")
                .with_resource("assessment"),
            UserAssessmentConstraints::AssessmentReference => ErrorKind::NotFound
                .with_context("Assessment not found")
                .with_resource("assessment"),
            UserAssessmentConstraints::UserReference => ErrorKind::StaleIdentity.into_error(),
            UserAssessmentConstraints::ScoreNonNegative => ErrorKind::ValidationError
                .with_context("Score cannot be negative")
                .with_resource("assessment"),
        }
    }
}

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::User(c) => c.into(),
            ConstraintViolation::Course(c) => c.into(),
            ConstraintViolation::Enrollment(c) => c.into(),
            ConstraintViolation::SupportTicket(c) => c.into(),
            ConstraintViolation::CourseModule(c) => c.into(),
            ConstraintViolation::Lesson(c) => c.into(),
            ConstraintViolation::Assessment(c) => c.into(),
            ConstraintViolation::UserAssessment(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::ServiceUnavailable.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(ref query_error) => {
                if let Some(constraint_name) = error.constraint()
                    && let Some(constraint) = ConstraintViolation::new(constraint_name)
                {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = constraint_name,
                        error = %query_error,
                        "query error (constraint violation)"
                    );
                    return constraint.into();
                }

                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use meta_postgres::types::ConstraintViolation;
    use meta_postgres::{PgError, PgTimeoutType};

    use super::*;

    #[test]
    fn email_unique_violation_is_email_taken() {
        let violation = ConstraintViolation::new("users_email_unique_idx");
        let error: Error<'static> = violation.map(Into::into).unwrap_or_default();
        assert_eq!(error.kind(), ErrorKind::EmailTaken);
    }

    #[test]
    fn duplicate_enrollment_is_conflict() {
        let error: Error<'static> = EnrollmentConstraints::UserCourseUnique.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);

        let error: Error<'static> = EnrollmentConstraints::CourseReference.into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn missing_parents_are_not_found() {
        let error: Error<'static> = LessonConstraints::ModuleReference.into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.context(), Some("Module not found"));

        let error: Error<'static> = CourseModuleConstraints::CourseReference.into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn unexpected_errors_hide_details() {
        let error: Error<'static> = PgError::Unexpected("pool exploded".into()).into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.context().is_none());
    }

    #[test]
    fn pool_timeouts_are_internal_errors() {
        for timeout in [PgTimeoutType::Wait, PgTimeoutType::Create, PgTimeoutType::Recycle] {
            let error: Error<'static> = PgError::Timeout(timeout).into();
            assert_eq!(error.kind(), ErrorKind::InternalServerError);
            assert!(error.context().is_none());
        }
    }
}
