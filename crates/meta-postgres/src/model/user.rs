//! User model: the stored credential record behind every identity.
//!
//! ## Models
//!
//! - [`User`] - Complete user row, including the password hash
//! - [`NewUser`] - Data structure for registering a new user
//! - [`UpdateUser`] - Partial update applied by profile and admin operations

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::users;
use crate::types::UserRole;

/// A registered principal that can authenticate.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, unique across all users.
    pub email: String,
    /// Optional human-readable name.
    pub display_name: Option<String>,
    /// Argon2id PHC string; never the plaintext password.
    pub password_hash: String,
    /// Authorization role.
    pub role: UserRole,
    /// Inactive users must never pass authentication.
    pub is_active: bool,
    /// Optional URL to the profile avatar image.
    pub avatar_url: Option<String>,
    /// Timestamp when the user was created.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new user.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}

/// Data for updating a user.
///
/// `None` leaves a column untouched; `Some(None)` clears a nullable column.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUser {
    pub display_name: Option<Option<String>>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub avatar_url: Option<Option<String>>,
    pub updated_at: Option<Timestamp>,
}

impl User {
    /// Returns whether the user may currently authenticate.
    #[inline]
    pub fn can_authenticate(&self) -> bool {
        self.is_active
    }
}

impl UpdateUser {
    /// Returns whether the update changes anything beyond the timestamp.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
            && self.avatar_url.is_none()
    }
}
