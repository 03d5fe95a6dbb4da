//! CORS, body limits and security response headers.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{Error, Result};

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S>: Sized {
    /// Layers CORS, the body limit and the security response headers.
    ///
    /// Fails if an origin or header value is not a valid header value.
    fn with_security(
        self,
        cors: &CorsConfig,
        headers: &SecurityHeadersConfig,
        body_limit: usize,
    ) -> Result<Self>;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(
        self,
        cors: &CorsConfig,
        headers: &SecurityHeadersConfig,
        body_limit: usize,
    ) -> Result<Self> {
        let cors_layer = CorsLayer::new()
            .allow_origin(cors.to_header_values()?)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(cors.allow_credentials)
            .max_age(cors.max_age());

        let mut router = self
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(RequestBodyLimitLayer::new(body_limit))
            .layer(cors_layer);

        for (name, value) in headers.header_values()? {
            router = router.layer(SetResponseHeaderLayer::overriding(name, value));
        }

        Ok(router)
    }
}

/// CORS allow-list for one surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Origins allowed to call the surface from a browser.
    pub allowed_origins: Vec<String>,
    /// Preflight cache duration in seconds.
    pub max_age_seconds: u64,
    /// Whether credentialed requests are allowed.
    pub allow_credentials: bool,
}

impl CorsConfig {
    /// Creates a credentialed allow-list for the given origins.
    pub fn new<I, O>(origins: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
            max_age_seconds: 3600,
            allow_credentials: true,
        }
    }

    /// Returns the preflight cache duration.
    #[inline]
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Rejects an empty allow-list or an origin that is not a header value.
    pub fn validate(&self) -> Result<()> {
        self.to_header_values().map(|_| ())
    }

    /// Parses the allow-list into header values.
    pub fn to_header_values(&self) -> Result<Vec<HeaderValue>> {
        if self.allowed_origins.is_empty() {
            return Err(Error::config("CORS allow-list cannot be empty"));
        }

        self.allowed_origins
            .iter()
            .map(|origin| {
                let origin = origin.trim();
                if origin == "*" {
                    return Err(Error::config(
                        "CORS allow-list cannot contain '*' with credentials",
                    ));
                }
                HeaderValue::from_str(origin)
                    .map_err(|_| Error::config(format!("invalid CORS origin: {origin:?}")))
            })
            .collect()
    }
}

/// Security response headers for one surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityHeadersConfig {
    /// HSTS max-age in seconds.
    pub hsts_max_age_seconds: u64,
    pub hsts_include_subdomains: bool,
    pub hsts_preload: bool,
    pub content_security_policy: String,
    pub frame_options: FrameOptions,
    pub referrer_policy: ReferrerPolicy,
}

impl SecurityHeadersConfig {
    /// Headers for the public site.
    pub fn public() -> Self {
        Self {
            hsts_max_age_seconds: 15_552_000,
            hsts_include_subdomains: true,
            hsts_preload: false,
            content_security_policy: "default-src 'self'; \
                 script-src 'self' 'unsafe-inline'; \
                 style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; \
                 font-src 'self' https://fonts.gstatic.com; \
                 img-src 'self' data: blob:; \
                 media-src 'self' blob:; \
                 connect-src 'self'"
                .to_owned(),
            frame_options: FrameOptions::SameOrigin,
            referrer_policy: ReferrerPolicy::StrictOriginWhenCrossOrigin,
        }
    }

    /// Headers for the back office.
    pub fn admin() -> Self {
        Self {
            hsts_max_age_seconds: 31_536_000,
            hsts_include_subdomains: true,
            hsts_preload: true,
            content_security_policy: "default-src 'none'; \
                 script-src 'self'; \
                 style-src 'self' 'unsafe-inline'; \
                 img-src 'self' data:; \
                 connect-src 'self'; \
                 font-src 'self'; \
                 object-src 'none'; \
                 frame-ancestors 'none'"
                .to_owned(),
            frame_options: FrameOptions::Deny,
            referrer_policy: ReferrerPolicy::NoReferrer,
        }
    }

    /// Returns the `Strict-Transport-Security` value.
    pub fn hsts_header_value(&self) -> String {
        let mut value = format!("max-age={}", self.hsts_max_age_seconds);
        if self.hsts_include_subdomains {
            value.push_str("; includeSubDomains");
        }
        if self.hsts_preload {
            value.push_str("; preload");
        }
        value
    }

    /// Rejects a policy that cannot be sent as a header.
    pub fn validate(&self) -> Result<()> {
        self.header_values().map(|_| ())
    }

    /// Returns every header this config sets.
    pub fn header_values(&self) -> Result<Vec<(HeaderName, HeaderValue)>> {
        let hsts = HeaderValue::from_str(&self.hsts_header_value())
            .map_err(|_| Error::config("invalid Strict-Transport-Security value"))?;
        let csp = HeaderValue::from_str(&self.content_security_policy)
            .map_err(|_| Error::config("invalid Content-Security-Policy value"))?;

        Ok(vec![
            (header::STRICT_TRANSPORT_SECURITY, hsts),
            (header::CONTENT_SECURITY_POLICY, csp),
            (
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static(self.frame_options.as_str()),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static(self.referrer_policy.as_str()),
            ),
        ])
    }
}

/// `X-Frame-Options` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOptions {
    Deny,
    SameOrigin,
}

impl FrameOptions {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// `Referrer-Policy` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferrerPolicy {
    NoReferrer,
    SameOrigin,
    StrictOriginWhenCrossOrigin,
}

impl ReferrerPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::SameOrigin => "same-origin",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_hsts_is_preloaded() {
        assert_eq!(
            SecurityHeadersConfig::admin().hsts_header_value(),
            "max-age=31536000; includeSubDomains; preload"
        );
        assert!(
            !SecurityHeadersConfig::public()
                .hsts_header_value()
                .contains("preload")
        );
    }

    #[test]
    fn csp_defaults_differ_per_surface() {
        assert!(
            SecurityHeadersConfig::admin()
                .content_security_policy
                .starts_with("default-src 'none'")
        );
        assert!(
            SecurityHeadersConfig::public()
                .content_security_policy
                .starts_with("default-src 'self'")
        );
    }

    #[test]
    fn default_headers_are_valid() -> anyhow::Result<()> {
        assert_eq!(SecurityHeadersConfig::public().header_values()?.len(), 5);
        SecurityHeadersConfig::admin().validate()?;
        Ok(())
    }

    #[test]
    fn cors_rejects_wildcard_and_empty_lists() {
        assert!(CorsConfig::new(["*"]).validate().is_err());
        assert!(CorsConfig::new(Vec::<String>::new()).validate().is_err());
        assert!(CorsConfig::new(["bad\norigin"]).validate().is_err());
        assert!(CorsConfig::new(["https://admin.example.com"]).validate().is_ok());
    }
}
