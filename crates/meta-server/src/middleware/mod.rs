//! Router middleware shared by both surfaces.
//!
//! Each concern is an extension trait on `axum::Router` so the surface
//! builder reads as a chain: recovery, observability, security, rate limits
//! and the authentication and role layers on individual route groups.

mod authentication;
mod authorization;
mod observability;
mod rate_limit;
mod recovery;
mod security;
mod surface;

pub use self::authentication::{RouterAuthExt, require_authentication};
pub use self::authorization::{RoleGuard, forbid_self_action, require_role};
pub use self::observability::{MakeRequestUuidV7, REQUEST_ID_HEADER, RouterObservabilityExt};
pub use self::rate_limit::{
    AUTH_SCOPE, GLOBAL_SCOPE, RateLimitLayerState, RouterRateLimitExt, enforce_rate_limit,
};
pub use self::recovery::RouterRecoveryExt;
pub use self::security::{
    CorsConfig, FrameOptions, ReferrerPolicy, RouterSecurityExt, SecurityHeadersConfig,
};
pub use self::surface::{SurfaceKind, SurfaceProfile};
