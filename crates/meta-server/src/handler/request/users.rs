//! Admin user management payloads.

use meta_postgres::model::UpdateUser;
use meta_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::double_option;

/// Payload for `PUT /api/admin/users/{userId}`.
///
/// Unknown fields are ignored; a body with none of these fields is rejected
/// by the handler.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<Option<String>>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url)]
    pub avatar_url: Option<Option<String>>,
}

impl UpdateUserRequest {
    /// Converts into a changeset.
    pub fn into_model(self) -> UpdateUser {
        UpdateUser {
            display_name: self.name,
            role: self.role,
            is_active: self.active,
            avatar_url: self.avatar_url,
            ..UpdateUser::default()
        }
    }
}
