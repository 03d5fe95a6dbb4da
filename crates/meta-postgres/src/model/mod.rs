//! Database models for all entities in the system.
//!
//! This module contains Diesel model definitions for all database tables,
//! including structs for querying, inserting, and updating records.

mod assessment;
mod course;
mod course_module;
mod enrollment;
mod support_ticket;
mod user;

pub use assessment::{Assessment, NewAssessment, UserAssessment};
pub use course::{Course, NewCourse, UpdateCourse};
pub use course_module::{CourseModule, Lesson, NewCourseModule, NewLesson};
pub use enrollment::{Enrollment, NewEnrollment};
pub use support_ticket::{NewSupportTicket, SupportTicket};
pub use user::{NewUser, UpdateUser, User};
