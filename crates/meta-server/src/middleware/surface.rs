//! Per-surface trust perimeter.
//!
//! The public and admin surfaces run the same router builder; everything
//! that differs between them lives in a [`SurfaceProfile`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::security::{CorsConfig, SecurityHeadersConfig};
use crate::service::RateLimitPolicy;
use crate::{Error, Result};

/// Which of the two surfaces a router serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SurfaceKind {
    /// Marketing pages, catalog browsing and student self-service.
    Public,
    /// User management, course authoring and analytics.
    Admin,
}

impl SurfaceKind {
    /// Returns the surface name used in logs, rate-limit keys and `/health`.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Admin => "admin",
        }
    }
}

/// Everything that differs between the two surfaces.
#[derive(Debug, Clone)]
#[must_use = "profiles do nothing unless passed to a router builder"]
pub struct SurfaceProfile {
    pub kind: SurfaceKind,
    pub cors: CorsConfig,
    pub security_headers: SecurityHeadersConfig,
    /// Budget shared by every route except `/health`.
    pub rate_limit: RateLimitPolicy,
    /// Stricter budget for login and registration, if this surface has them.
    pub auth_rate_limit: Option<RateLimitPolicy>,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
    pub request_timeout: Duration,
}

impl SurfaceProfile {
    /// Public surface defaults: `default-src 'self'` CSP, 100 requests per
    /// 15 minutes, 5 login or registration attempts per 15 minutes and a
    /// 10 MiB body limit.
    pub fn public() -> Self {
        Self {
            kind: SurfaceKind::Public,
            cors: CorsConfig::new(["http://localhost:5000"]),
            security_headers: SecurityHeadersConfig::public(),
            rate_limit: RateLimitPolicy::new(Duration::from_secs(15 * 60), 100),
            auth_rate_limit: Some(RateLimitPolicy::new(Duration::from_secs(15 * 60), 5)),
            body_limit: 10 * 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Admin surface defaults: `default-src 'none'` CSP with HSTS preload,
    /// 20 requests per 5 minutes and a 5 MiB body limit.
    pub fn admin() -> Self {
        Self {
            kind: SurfaceKind::Admin,
            cors: CorsConfig::new(["http://localhost:5001"]),
            security_headers: SecurityHeadersConfig::admin(),
            rate_limit: RateLimitPolicy::new(Duration::from_secs(5 * 60), 20),
            auth_rate_limit: None,
            body_limit: 5 * 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Replaces the CORS allow-list.
    pub fn with_allowed_origins<I, O>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        self.cors = CorsConfig::new(origins);
        self
    }

    /// Replaces the surface-wide rate limit.
    pub fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    /// Replaces the login and registration rate limit.
    pub fn with_auth_rate_limit(mut self, policy: Option<RateLimitPolicy>) -> Self {
        self.auth_rate_limit = policy;
        self
    }

    /// Replaces the request body limit.
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Replaces the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Rejects profiles that would leave the surface closed or unbounded.
    pub fn validate(&self) -> Result<()> {
        let surface = self.kind.as_str();

        self.cors.validate().map_err(|e| {
            Error::config(format!("{surface} surface: {}", e.message()))
        })?;
        self.security_headers.validate().map_err(|e| {
            Error::config(format!("{surface} surface: {}", e.message()))
        })?;

        let policies = std::iter::once(("rate limit", &self.rate_limit))
            .chain(self.auth_rate_limit.as_ref().map(|p| ("auth rate limit", p)));
        for (name, policy) in policies {
            if policy.max_requests == 0 {
                return Err(Error::config(format!(
                    "{surface} surface: {name} ceiling must be greater than zero"
                )));
            }
            if policy.window.is_zero() {
                return Err(Error::config(format!(
                    "{surface} surface: {name} window must be greater than zero"
                )));
            }
        }

        if self.body_limit == 0 {
            return Err(Error::config(format!(
                "{surface} surface: body limit must be greater than zero"
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::config(format!(
                "{surface} surface: request timeout must be greater than zero"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profiles_are_valid() -> anyhow::Result<()> {
        SurfaceProfile::public().validate()?;
        SurfaceProfile::admin().validate()?;
        Ok(())
    }

    #[test]
    fn admin_budget_is_stricter() {
        let public = SurfaceProfile::public();
        let admin = SurfaceProfile::admin();

        let per_second = |policy: RateLimitPolicy| {
            f64::from(policy.max_requests) / policy.window.as_secs_f64()
        };
        assert!(per_second(admin.rate_limit) < per_second(public.rate_limit));
        assert!(admin.body_limit < public.body_limit);
        assert!(admin.auth_rate_limit.is_none());
    }

    #[test]
    fn rejects_zero_ceiling() {
        let profile = SurfaceProfile::admin()
            .with_rate_limit(RateLimitPolicy::new(Duration::from_secs(60), 0));
        assert!(profile.validate().is_err());
    }

    #[test]
    fn rejects_empty_origins() {
        let profile = SurfaceProfile::public().with_allowed_origins(Vec::<String>::new());
        assert!(profile.validate().is_err());
    }

    #[test]
    fn surface_names() {
        assert_eq!(SurfaceKind::Public.to_string(), "public");
        assert_eq!(SurfaceKind::Admin.as_str(), "admin");
        assert_eq!("admin".parse::<SurfaceKind>().ok(), Some(SurfaceKind::Admin));
    }
}
