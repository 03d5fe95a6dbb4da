//! Database query repositories for all entities in the system.
//!
//! Each repository is a trait implemented for [`PgConnection`], so any pooled
//! connection obtained from [`PgClient`] can run the queries directly.
//!
//! [`PgConnection`]: crate::PgConnection
//! [`PgClient`]: crate::PgClient

pub mod assessment;
pub mod course;
pub mod curriculum;
pub mod enrollment;
pub mod support_ticket;
pub mod user;

pub use assessment::{AssessmentRepository, AssessmentStatistics};
pub use course::{CourseAnalytics, CourseRepository};
pub use curriculum::CurriculumRepository;
pub use enrollment::{EnrollmentRepository, EnrollmentStatistics};
pub use support_ticket::SupportTicketRepository;
pub use user::{UserRepository, UserStatistics};
