//! Request bodies and query strings for HTTP handlers.

mod assessments;
mod authentications;
mod courses;
mod curriculum;
mod enrollments;
mod paginations;
mod support_tickets;
mod users;

pub use assessments::*;
pub use authentications::*;
pub use courses::*;
pub use curriculum::*;
pub use enrollments::*;
pub use paginations::*;
pub use support_tickets::*;
pub use users::*;

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
