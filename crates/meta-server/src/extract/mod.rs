//! Request extractors.
//!
//! - [`AuthContext`]: the verified identity behind a bearer token.
//! - [`Json`], [`ValidateJson`], [`Path`], [`Query`]: axum extractors that
//!   reject with the shared error body.

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthContext, BearerToken};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
