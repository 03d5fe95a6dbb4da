//! Database constraint violations organized by table.
//!
//! Constraint names reported by Postgres are parsed into typed variants so the
//! server can map, for example, a lost registration race on the email index to
//! a domain error rather than a generic database failure.

pub mod assessments;
pub mod course_modules;
pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod support_tickets;
pub mod user_assessments;
pub mod users;

use std::fmt;

pub use assessments::AssessmentConstraints;
pub use course_modules::CourseModuleConstraints;
pub use courses::CourseConstraints;
pub use enrollments::EnrollmentConstraints;
pub use lessons::LessonConstraints;
use serde::{Deserialize, Serialize};
pub use support_tickets::SupportTicketConstraints;
pub use user_assessments::UserAssessmentConstraints;
pub use users::UserConstraints;

/// Unified constraint violation enum that can represent any known constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    User(UserConstraints),
    Course(CourseConstraints),
    Enrollment(EnrollmentConstraints),
    SupportTicket(SupportTicketConstraints),
    CourseModule(CourseModuleConstraints),
    Lesson(LessonConstraints),
    Assessment(AssessmentConstraints),
    UserAssessment(UserAssessmentConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Business logic constraints, including references to other rows.
    BusinessLogic,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// ```
    /// use meta_postgres::types::ConstraintViolation;
    ///
    /// assert!(ConstraintViolation::new("users_email_unique_idx").is_some());
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        // Route on the table prefix before attempting to parse.
        if constraint.starts_with("users_") {
            UserConstraints::new(constraint).map(ConstraintViolation::User)
        } else if constraint.starts_with("courses_") {
            CourseConstraints::new(constraint).map(ConstraintViolation::Course)
        } else if constraint.starts_with("enrollments_") {
            EnrollmentConstraints::new(constraint).map(ConstraintViolation::Enrollment)
        } else if constraint.starts_with("support_tickets_") {
            SupportTicketConstraints::new(constraint).map(ConstraintViolation::SupportTicket)
        } else if constraint.starts_with("course_modules_") {
            CourseModuleConstraints::new(constraint).map(ConstraintViolation::CourseModule)
        } else if constraint.starts_with("lessons_") {
            LessonConstraints::new(constraint).map(ConstraintViolation::Lesson)
        } else if constraint.starts_with("assessments_") {
            AssessmentConstraints::new(constraint).map(ConstraintViolation::Assessment)
        } else if constraint.starts_with("user_assessments_") {
            UserAssessmentConstraints::new(constraint).map(ConstraintViolation::UserAssessment)
        } else {
            None
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::Course(_) => "courses",
            ConstraintViolation::Enrollment(_) => "enrollments",
            ConstraintViolation::SupportTicket(_) => "support_tickets",
            ConstraintViolation::CourseModule(_) => "course_modules",
            ConstraintViolation::Lesson(_) => "lessons",
            ConstraintViolation::Assessment(_) => "assessments",
            ConstraintViolation::UserAssessment(_) => "user_assessments",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::Course(c) => c.categorize(),
            ConstraintViolation::Enrollment(c) => c.categorize(),
            ConstraintViolation::SupportTicket(c) => c.categorize(),
            ConstraintViolation::CourseModule(c) => c.categorize(),
            ConstraintViolation::Lesson(c) => c.categorize(),
            ConstraintViolation::Assessment(c) => c.categorize(),
            ConstraintViolation::UserAssessment(c) => c.categorize(),
        }
    }

    /// Returns the underlying constraint name as used in the database.
    #[inline]
    pub fn constraint_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => write!(f, "{}", c),
            ConstraintViolation::Course(c) => write!(f, "{}", c),
            ConstraintViolation::Enrollment(c) => write!(f, "{}", c),
            ConstraintViolation::SupportTicket(c) => write!(f, "{}", c),
            ConstraintViolation::CourseModule(c) => write!(f, "{}", c),
            ConstraintViolation::Lesson(c) => write!(f, "{}", c),
            ConstraintViolation::Assessment(c) => write!(f, "{}", c),
            ConstraintViolation::UserAssessment(c) => write!(f, "{}", c),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {}", value))
    }
}
