//! Request authentication.
//!
//! [`BearerToken`] reads the raw header; [`AuthContext`] verifies it and
//! re-hydrates the identity from the credential store.

mod auth_context;
mod bearer_token;

pub use self::auth_context::AuthContext;
pub use self::bearer_token::BearerToken;
