//! Commonly used types and repository traits.
//!
//! ```rust
//! use meta_postgres::prelude::*;
//! ```

pub use crate::model::{
    Assessment, Course, CourseModule, Enrollment, Lesson, NewAssessment, NewCourse,
    NewCourseModule, NewEnrollment, NewLesson, NewSupportTicket, NewUser, SupportTicket,
    UpdateCourse, UpdateUser, User, UserAssessment,
};
pub use crate::query::{
    AssessmentRepository, AssessmentStatistics, CourseAnalytics, CourseRepository,
    CurriculumRepository, EnrollmentRepository, EnrollmentStatistics, SupportTicketRepository,
    UserRepository, UserStatistics,
};
pub use crate::types::{
    AssessmentKind, ConstraintViolation, EnrollmentStatus, OffsetPagination, SubmissionStatus,
    TicketPriority, TicketStatus, UserRole,
};
pub use crate::{PgClient, PgConfig, PgConn, PgError, PgResult};
