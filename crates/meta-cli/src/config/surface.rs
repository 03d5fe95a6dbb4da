//! Per-surface listener configuration.
//!
//! Each surface gets its own bind address, CORS allow-list, rate-limit
//! budget and body limit. The admin surface defaults to loopback.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use meta_server::middleware::SurfaceProfile;
use meta_server::service::RateLimitPolicy;
use serde::{Deserialize, Serialize};

use super::ServerConfig;
use crate::TRACING_TARGET_CONFIG;

/// Public surface listener.
///
/// # Environment Variables
///
/// - `PUBLIC_HOST` (default: 0.0.0.0), `PUBLIC_PORT` (default: 5000)
/// - `PUBLIC_ALLOWED_ORIGINS` - Comma-separated CORS allow-list
/// - `PUBLIC_RATE_LIMIT_WINDOW_SECS` / `PUBLIC_RATE_LIMIT_MAX` (900 s / 100)
/// - `AUTH_RATE_LIMIT_WINDOW_SECS` / `AUTH_RATE_LIMIT_MAX` (900 s / 5)
/// - `PUBLIC_BODY_LIMIT_BYTES` (default: 10 MiB)
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct PublicSurfaceConfig {
    #[arg(long, env = "PUBLIC_HOST", default_value = "0.0.0.0")]
    pub public_host: IpAddr,

    #[arg(long, env = "PUBLIC_PORT", default_value_t = 5000)]
    pub public_port: u16,

    /// Origins allowed to call the public surface from a browser.
    #[arg(
        long,
        env = "PUBLIC_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5000"
    )]
    pub public_allowed_origins: Vec<String>,

    #[arg(long, env = "PUBLIC_RATE_LIMIT_WINDOW_SECS", default_value_t = 900)]
    pub public_rate_limit_window_secs: u64,

    /// Requests per client per window across all public routes.
    #[arg(long, env = "PUBLIC_RATE_LIMIT_MAX", default_value_t = 100)]
    pub public_rate_limit_max: u32,

    #[arg(long, env = "AUTH_RATE_LIMIT_WINDOW_SECS", default_value_t = 900)]
    pub auth_rate_limit_window_secs: u64,

    /// Login and registration attempts per client per window.
    #[arg(long, env = "AUTH_RATE_LIMIT_MAX", default_value_t = 5)]
    pub auth_rate_limit_max: u32,

    #[arg(long, env = "PUBLIC_BODY_LIMIT_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub public_body_limit_bytes: usize,
}

impl PublicSurfaceConfig {
    pub fn validate(&self) -> AnyhowResult<()> {
        validate_listener(
            self.public_port,
            &self.public_allowed_origins,
            &[
                ("rate limit", self.public_rate_limit_window_secs, self.public_rate_limit_max),
                ("auth rate limit", self.auth_rate_limit_window_secs, self.auth_rate_limit_max),
            ],
        )
    }

    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.public_host, self.public_port)
    }

    /// Builds the router profile for this surface.
    pub fn profile(&self, server: &ServerConfig) -> SurfaceProfile {
        SurfaceProfile::public()
            .with_allowed_origins(self.public_allowed_origins.iter().cloned())
            .with_rate_limit(RateLimitPolicy::new(
                Duration::from_secs(self.public_rate_limit_window_secs),
                self.public_rate_limit_max,
            ))
            .with_auth_rate_limit(Some(RateLimitPolicy::new(
                Duration::from_secs(self.auth_rate_limit_window_secs),
                self.auth_rate_limit_max,
            )))
            .with_body_limit(self.public_body_limit_bytes)
            .with_request_timeout(server.request_timeout())
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            origins = ?self.public_allowed_origins,
            rate_limit_max = self.public_rate_limit_max,
            rate_limit_window_secs = self.public_rate_limit_window_secs,
            auth_rate_limit_max = self.auth_rate_limit_max,
            body_limit_bytes = self.public_body_limit_bytes,
            "public surface configured"
        );
    }
}

/// Admin surface listener.
///
/// # Environment Variables
///
/// - `ADMIN_HOST` (default: 127.0.0.1), `ADMIN_PORT` (default: 5001)
/// - `ADMIN_ALLOWED_ORIGINS` - Comma-separated CORS allow-list
/// - `ADMIN_RATE_LIMIT_WINDOW_SECS` / `ADMIN_RATE_LIMIT_MAX` (300 s / 20)
/// - `ADMIN_BODY_LIMIT_BYTES` (default: 5 MiB)
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct AdminSurfaceConfig {
    /// Bind address; keep this on loopback or a private network.
    #[arg(long, env = "ADMIN_HOST", default_value = "127.0.0.1")]
    pub admin_host: IpAddr,

    #[arg(long, env = "ADMIN_PORT", default_value_t = 5001)]
    pub admin_port: u16,

    #[arg(
        long,
        env = "ADMIN_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5001"
    )]
    pub admin_allowed_origins: Vec<String>,

    #[arg(long, env = "ADMIN_RATE_LIMIT_WINDOW_SECS", default_value_t = 300)]
    pub admin_rate_limit_window_secs: u64,

    #[arg(long, env = "ADMIN_RATE_LIMIT_MAX", default_value_t = 20)]
    pub admin_rate_limit_max: u32,

    #[arg(long, env = "ADMIN_BODY_LIMIT_BYTES", default_value_t = 5 * 1024 * 1024)]
    pub admin_body_limit_bytes: usize,
}

impl AdminSurfaceConfig {
    pub fn validate(&self) -> AnyhowResult<()> {
        validate_listener(
            self.admin_port,
            &self.admin_allowed_origins,
            &[("rate limit", self.admin_rate_limit_window_secs, self.admin_rate_limit_max)],
        )
    }

    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.admin_host, self.admin_port)
    }

    /// Returns whether the admin surface is reachable beyond this host.
    #[must_use]
    pub fn is_exposed(&self) -> bool {
        !self.admin_host.is_loopback()
    }

    /// Builds the router profile for this surface.
    pub fn profile(&self, server: &ServerConfig) -> SurfaceProfile {
        SurfaceProfile::admin()
            .with_allowed_origins(self.admin_allowed_origins.iter().cloned())
            .with_rate_limit(RateLimitPolicy::new(
                Duration::from_secs(self.admin_rate_limit_window_secs),
                self.admin_rate_limit_max,
            ))
            .with_body_limit(self.admin_body_limit_bytes)
            .with_request_timeout(server.request_timeout())
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            origins = ?self.admin_allowed_origins,
            rate_limit_max = self.admin_rate_limit_max,
            rate_limit_window_secs = self.admin_rate_limit_window_secs,
            body_limit_bytes = self.admin_body_limit_bytes,
            "admin surface configured"
        );

        if self.is_exposed() {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                addr = %self.server_addr(),
                "admin surface is bound to a non-loopback address; restrict it with firewall rules"
            );
        }
    }
}

/// Rejects a zero port, an empty allow-list and zero rate-limit budgets.
fn validate_listener(
    port: u16,
    origins: &[String],
    budgets: &[(&str, u64, u32)],
) -> AnyhowResult<()> {
    if port == 0 {
        return Err(anyhow!("Port must be greater than zero."));
    }

    if origins.iter().all(|origin| origin.trim().is_empty()) {
        return Err(anyhow!("At least one allowed origin is required."));
    }

    for &(name, window_secs, max_requests) in budgets {
        if window_secs == 0 || max_requests == 0 {
            return Err(anyhow!(
                "The {name} window and ceiling must both be greater than zero."
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_budgets_and_ports() {
        assert!(validate_listener(0, &["http://a".into()], &[]).is_err());
        assert!(validate_listener(5000, &[], &[]).is_err());
        assert!(validate_listener(5000, &["http://a".into()], &[("rate limit", 60, 0)]).is_err());
        assert!(validate_listener(5000, &["http://a".into()], &[("rate limit", 60, 10)]).is_ok());
    }
}
