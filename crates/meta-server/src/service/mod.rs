//! Application state and dependency injection.

mod auth;
mod config;
mod security;
mod store;

use std::sync::Arc;

pub use crate::service::auth::{AuthService, AuthSession};
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::security::{
    AuthClaims, INSECURE_DEFAULT_SECRET, InMemoryRateLimitStore, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH, PasswordHasher, RateLimitDecision, RateLimitKey, RateLimitPolicy,
    RateLimitStore, TokenCodec, TokenConfig, TokenSubject, validate_password,
};
#[cfg(test)]
pub use crate::service::store::MemoryStore;
pub use crate::service::store::{
    CatalogStore, IdentityStore, PgStore, SharedCatalogStore, SharedIdentityStore,
};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Shared handle to the rate-limit counter store.
pub type SharedRateLimitStore = Arc<dyn RateLimitStore>;

/// Application state shared by both surfaces.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // Stores:
    pub identities: SharedIdentityStore,
    pub catalog: SharedCatalogStore,
    pub rate_limits: SharedRateLimitStore,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub token_codec: TokenCodec,
    pub auth_service: AuthService,
}

impl ServiceState {
    /// Assembles state from already constructed stores.
    pub fn new(
        identities: SharedIdentityStore,
        catalog: SharedCatalogStore,
        rate_limits: SharedRateLimitStore,
        token_codec: TokenCodec,
    ) -> Self {
        let password_hasher = PasswordHasher::new();
        let auth_service = AuthService::new(
            identities.clone(),
            password_hasher.clone(),
            token_codec.clone(),
        );

        Self {
            identities,
            catalog,
            rate_limits,
            password_hasher,
            token_codec,
            auth_service,
        }
    }

    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres, applies migrations and loads the signing key.
    /// Rate-limit counters start out in process memory.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        let token_codec = service_config.load_token_codec()?;
        let pg_store = PgStore::new(service_config.connect_postgres().await?);
        let pg_store = Arc::new(pg_store);

        Ok(Self::new(
            pg_store.clone(),
            pg_store,
            Arc::new(InMemoryRateLimitStore::new()),
            token_codec,
        ))
    }

    /// Builds state over a fresh in-memory store.
    #[cfg(test)]
    pub(crate) fn in_memory() -> (Self, MemoryStore) {
        let store = MemoryStore::new();
        let config = TokenConfig::with_secret("in-memory-test-secret-0123456789abcdef");
        let token_codec = TokenCodec::from_config(&config).expect("valid token config");

        let state = Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(InMemoryRateLimitStore::new()),
            token_codec,
        );

        (state, store)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// Stores:
impl_di!(identities: SharedIdentityStore);
impl_di!(catalog: SharedCatalogStore);
impl_di!(rate_limits: SharedRateLimitStore);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(token_codec: TokenCodec);
impl_di!(auth_service: AuthService);
