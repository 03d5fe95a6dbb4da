//! User response types. None of them carries the password hash.

use jiff::Timestamp;
use meta_postgres::model;
use meta_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::AuthContext;

/// Public view of a user, returned after login and registration.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub avatar_url: Option<String>,
}

impl UserSummary {
    pub fn from_model(user: &model::User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.display_name.clone(),
            role: user.role,
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// The identity a request is authenticated as.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}

impl From<AuthContext> for CurrentUser {
    fn from(context: AuthContext) -> Self {
        Self {
            id: context.id,
            email: context.email,
            name: context.name,
            role: context.role,
        }
    }
}

/// Back-office view of a user.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub active: bool,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
}

impl AdminUser {
    pub fn from_model(user: model::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.display_name,
            role: user.role,
            active: user.is_active,
            avatar_url: user.avatar_url,
            created_at: user.created_at.into(),
        }
    }
}

/// `{ "user": ... }` envelope.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope<T> {
    pub user: T,
}

impl<T> UserEnvelope<T> {
    pub fn new(user: T) -> Self {
        Self { user }
    }
}

/// `{ "users": [...] }` envelope.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUsers {
    pub users: Vec<AdminUser>,
}

impl AdminUsers {
    pub fn from_models(users: Vec<model::User>) -> Self {
        Self {
            users: users.into_iter().map(AdminUser::from_model).collect(),
        }
    }
}
