#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};

// Tracing target constants for consistent logging.

/// Tracing target for token issuance and request authentication.
pub const TRACING_TARGET_AUTHENTICATION: &str = "meta_server::authentication";

/// Tracing target for role checks and self-action rejections.
pub const TRACING_TARGET_AUTHORIZATION: &str = "meta_server::authorization";

/// Tracing target for surface construction and rate limiting.
pub const TRACING_TARGET_SURFACE: &str = "meta_server::surface";
