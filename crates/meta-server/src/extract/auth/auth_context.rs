//! Verified per-request identity.
//!
//! Resolution runs four strictly ordered steps, each gating the next:
//!
//! 1. Read the bearer token from the `Authorization` header.
//! 2. Verify the token with the [`TokenCodec`].
//! 3. Re-fetch the user by the token subject from the credential store.
//! 4. Build the context from the live user record and cache it in the
//!    request extensions.
//!
//! The context is attached only after all four steps succeed, so a failed
//! request never carries a partial identity.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use meta_postgres::model::User;
use meta_postgres::types::UserRole;
use uuid::Uuid;

use super::BearerToken;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{SharedIdentityStore, TokenCodec, TokenSubject};

/// The identity a request was authenticated as.
///
/// Built from the live user record rather than the token snapshot, so a role
/// change or deactivation takes effect on the very next request.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
}

impl AuthContext {
    /// Creates a context from a user record.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.display_name.clone(),
            role: user.role,
        }
    }

    /// Returns the claims a refreshed token is issued for.
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }

    /// Rejects access to another user's resources with `403 Forbidden`.
    pub fn ensure_self(&self, user_id: Uuid) -> Result<()> {
        if self.id == user_id {
            return Ok(());
        }

        tracing::warn!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = %self.id,
            target_user_id = %user_id,
            "access to another user's resources denied"
        );

        Err(ErrorKind::Forbidden.into_error())
    }

    /// Resolves a verified, re-hydrated context from a raw token.
    pub async fn from_token(
        token: &BearerToken,
        token_codec: &TokenCodec,
        identities: &SharedIdentityStore,
    ) -> Result<Self> {
        let claims = token_codec.verify(token.as_str())?;

        let user = identities
            .find_user_by_id(claims.user_id)
            .await
            .map_err(|error| {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    user_id = %claims.user_id,
                    error = %error,
                    "identity lookup failed during authentication"
                );
                Error::from(error)
            })?;

        let Some(user) = user.filter(User::can_authenticate) else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = %claims.user_id,
                "token subject is missing or inactive"
            );
            return Err(ErrorKind::StaleIdentity.with_resource("authentication"));
        };

        if user.role != claims.role {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = %user.id,
                token_role = %claims.role,
                live_role = %user.role,
                "role changed since the token was issued"
            );
        }

        Ok(Self::from_user(&user))
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Sync + Send,
    TokenCodec: FromRef<S>,
    SharedIdentityStore: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<Self>() {
            return Ok(context.clone());
        }

        let token = BearerToken::from_request_parts(parts, state).await?;
        let token_codec = TokenCodec::from_ref(state);
        let identities = SharedIdentityStore::from_ref(state);

        let context = Self::from_token(&token, &token_codec, &identities).await?;

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = %context.id,
            role = %context.role,
            "request authenticated"
        );

        parts.extensions.insert(context.clone());
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::get;
    use axum_test::TestServer;
    use meta_postgres::model::{NewUser, UpdateUser};

    use super::*;
    use crate::service::{IdentityStore, ServiceState};

    async fn whoami(context: AuthContext) -> String {
        format!("{}:{}", context.email, context.role)
    }

    async fn setup() -> anyhow::Result<(TestServer, ServiceState, User)> {
        let (state, store) = ServiceState::in_memory();
        let user = store
            .create_user(NewUser {
                email: "alice@example.com".into(),
                display_name: Some("Alice".into()),
                password_hash: "unused".into(),
                ..NewUser::default()
            })
            .await?;

        let router = Router::new()
            .route("/whoami", get(whoami))
            .with_state(state.clone());
        Ok((TestServer::new(router)?, state, user))
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    #[tokio::test]
    async fn missing_header_is_missing_token() -> anyhow::Result<()> {
        let (server, _, _) = setup().await?;

        let response = server.get("/whoami").await;
        response.assert_status_unauthorized();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "missing_token");
        Ok(())
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_invalid_token() -> anyhow::Result<()> {
        let (server, _, _) = setup().await?;

        let response = server
            .get("/whoami")
            .authorization("Basic YWxpY2U6c2VjcmV0")
            .await;
        response.assert_status_unauthorized();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "invalid_token");
        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_is_invalid_token() -> anyhow::Result<()> {
        let (server, _, _) = setup().await?;

        let response = server
            .get("/whoami")
            .authorization(bearer("not.a.jwt"))
            .await;
        response.assert_status_unauthorized();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "invalid_token");
        Ok(())
    }

    #[tokio::test]
    async fn context_reflects_the_live_role() -> anyhow::Result<()> {
        let (server, state, user) = setup().await?;
        let token = state.token_codec.issue(&TokenSubject::from(&user))?;

        state
            .identities
            .update_user(
                user.id,
                UpdateUser {
                    role: Some(UserRole::Analyst),
                    ..UpdateUser::default()
                },
            )
            .await?;

        let response = server.get("/whoami").authorization(bearer(&token)).await;
        response.assert_status_ok();
        response.assert_text("alice@example.com:analyst");
        Ok(())
    }

    #[tokio::test]
    async fn deactivated_user_is_stale_identity() -> anyhow::Result<()> {
        let (server, state, user) = setup().await?;
        let token = state.token_codec.issue(&TokenSubject::from(&user))?;

        let response = server.get("/whoami").authorization(bearer(&token)).await;
        response.assert_status_ok();

        state
            .identities
            .update_user(
                user.id,
                UpdateUser {
                    is_active: Some(false),
                    ..UpdateUser::default()
                },
            )
            .await?;

        let response = server.get("/whoami").authorization(bearer(&token)).await;
        response.assert_status_unauthorized();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "stale_identity");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_subject_is_stale_identity() -> anyhow::Result<()> {
        let (server, state, _) = setup().await?;
        let ghost = TokenSubject {
            id: Uuid::now_v7(),
            email: "ghost@example.com".into(),
            name: None,
            role: UserRole::Admin,
        };
        let token = state.token_codec.issue(&ghost)?;

        let response = server.get("/whoami").authorization(bearer(&token)).await;
        response.assert_status_unauthorized();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "stale_identity");
        Ok(())
    }

    #[test]
    fn ensure_self_rejects_other_users() {
        let context = AuthContext {
            id: Uuid::now_v7(),
            email: "alice@example.com".into(),
            name: None,
            role: UserRole::User,
        };

        assert!(context.ensure_self(context.id).is_ok());
        let error = context
            .ensure_self(Uuid::now_v7())
            .expect_err("other user");
        assert_eq!(error.kind(), ErrorKind::Forbidden);
    }
}
