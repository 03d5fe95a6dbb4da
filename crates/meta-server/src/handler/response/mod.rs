//! Response bodies returned by HTTP handlers.

mod assessments;
mod authentications;
mod courses;
mod curriculum;
mod enrollments;
mod error_response;
mod monitors;
mod statistics;
mod support_tickets;
mod users;

pub use assessments::*;
pub use authentications::*;
pub use courses::*;
pub use curriculum::*;
pub use enrollments::*;
pub use error_response::ErrorResponse;
pub use monitors::*;
pub use statistics::*;
pub use support_tickets::*;
pub use users::*;
