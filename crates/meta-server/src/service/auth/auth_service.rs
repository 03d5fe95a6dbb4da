//! The only component that compares submitted passwords with stored hashes.

use meta_postgres::model::{NewUser, User};
use meta_postgres::types::UserRole;

use crate::extract::AuthContext;
use crate::handler::{ErrorKind, Result};
use crate::service::security::{PasswordHasher, TokenCodec, TokenSubject};
use crate::service::store::SharedIdentityStore;

/// Tracing target for login and registration.
const TRACING_TARGET: &str = "meta_server::service::auth";

/// A user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Login, registration and token refresh.
#[derive(Clone)]
pub struct AuthService {
    identities: SharedIdentityStore,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        identities: SharedIdentityStore,
        password_hasher: PasswordHasher,
        token_codec: TokenCodec,
    ) -> Self {
        Self {
            identities,
            password_hasher,
            token_codec,
        }
    }

    /// Verifies credentials and issues a token.
    ///
    /// An unknown email, an inactive account and a wrong password all fail
    /// with the same bare `InvalidCredentials` error, and all three run one
    /// full Argon2 verification so timing does not tell them apart either.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let user = self.identities.find_user_by_email(email).await?;

        let password_valid = match &user {
            Some(user) => self
                .password_hasher
                .verify_password(password, &user.password_hash)
                .is_ok(),
            None => self.password_hasher.verify_dummy_password(password),
        };

        let user = match user {
            Some(user) if password_valid && user.can_authenticate() => user,
            user => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    email = %email.trim(),
                    user_exists = user.is_some(),
                    "login failed"
                );

                return Err(ErrorKind::InvalidCredentials.into_error());
            }
        };

        let token = self.token_codec.issue(&TokenSubject::from(&user))?;

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %user.id,
            role = %user.role,
            "login successful"
        );

        Ok(AuthSession { user, token })
    }

    /// Creates a `user`-role account and issues a token for it.
    ///
    /// The email is checked up front; a registration that loses a race
    /// between that check and the insert is caught by the unique index and
    /// reported as `EmailTaken` too.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<AuthSession> {
        let email = email.trim();
        if self.identities.email_exists(email).await? {
            tracing::debug!(
                target: TRACING_TARGET,
                email = %email,
                "registration rejected: email already registered"
            );

            return Err(ErrorKind::EmailTaken.into_error());
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let new_user = NewUser {
            email: email.to_owned(),
            display_name: name,
            password_hash,
            role: UserRole::User,
        };

        let user = self.identities.create_user(new_user).await?;
        let token = self.token_codec.issue(&TokenSubject::from(&user))?;

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %user.id,
            "user registered"
        );

        Ok(AuthSession { user, token })
    }

    /// Re-issues a token for an already authenticated request.
    ///
    /// The new token snapshots the live user held by the context, so a role
    /// change since the last login is picked up.
    pub fn refresh(&self, context: &AuthContext) -> Result<String> {
        let token = self.token_codec.issue(&context.subject())?;

        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %context.id,
            "token refreshed"
        );

        Ok(token)
    }

    /// Returns the token codec used to sign tokens.
    #[inline]
    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }
}
