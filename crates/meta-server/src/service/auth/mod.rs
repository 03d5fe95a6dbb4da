//! Credential verification and token issuance.

mod auth_service;

pub use auth_service::{AuthService, AuthSession};
