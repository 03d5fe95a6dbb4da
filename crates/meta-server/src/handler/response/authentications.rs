//! Login, registration and refresh responses.

use serde::{Deserialize, Serialize};

use super::UserSummary;
use crate::service::AuthSession;

/// Returned by login and registration.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserSummary,
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: UserSummary::from_model(&session.user),
            token: session.token,
        }
    }
}

/// Returned by token refresh.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}
