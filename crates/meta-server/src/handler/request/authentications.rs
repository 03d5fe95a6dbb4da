//! Login and registration payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::service::validate_password;

/// Credentials for `POST /api/auth/login`.
///
/// The email is not format-checked: a malformed address simply fails as
/// invalid credentials, like an unknown one.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Payload for `POST /api/auth/register`.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}
