//! Contains constraints, enumerations and other custom types.

mod constraints;
mod enums;
mod pagination;

pub use constraints::{
    AssessmentConstraints, ConstraintCategory, ConstraintViolation, CourseConstraints,
    CourseModuleConstraints, EnrollmentConstraints, LessonConstraints, SupportTicketConstraints,
    UserAssessmentConstraints, UserConstraints,
};
pub use enums::{
    AssessmentKind, EnrollmentStatus, SubmissionStatus, TicketPriority, TicketStatus, UserRole,
};
pub use pagination::{DEFAULT_LIMIT, MAX_LIMIT, OffsetPagination};
