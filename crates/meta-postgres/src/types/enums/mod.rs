//! Database enumeration types for type-safe queries.
//!
//! Each enumeration mirrors a PostgreSQL ENUM type from the schema and carries
//! serde support so it can be used directly in API payloads.

pub mod assessment_kind;
pub mod enrollment_status;
pub mod submission_status;
pub mod ticket_priority;
pub mod ticket_status;
pub mod user_role;

pub use assessment_kind::AssessmentKind;
pub use enrollment_status::EnrollmentStatus;
pub use submission_status::SubmissionStatus;
pub use ticket_priority::TicketPriority;
pub use ticket_status::TicketStatus;
pub use user_role::UserRole;
