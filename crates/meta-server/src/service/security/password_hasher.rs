//! Password hashing and verification using Argon2id.
//!
//! The Authentication Service is the only caller: it hashes on registration
//! and verifies on login. Both methods return handler errors so failures can
//! flow straight into an HTTP response.

use std::sync::LazyLock;

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::Rng;
use rand::rngs::OsRng;

use crate::handler::{ErrorKind, Result};

/// Tracing target for password hashing.
const TRACING_TARGET: &str = "meta_server::service::password_hasher";

/// Hash of a random throwaway password, computed once per process with the
/// same parameters as real hashes.
///
/// `None` only if hashing failed at startup; unknown-email logins then skip
/// the dummy verification and the failure is logged.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let dummy_password: String = (0..32)
        .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
        .collect();

    PasswordHasher::create().hash_password(&dummy_password).ok()
});

/// Argon2id password hashing service.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new instance of the [`PasswordHasher`] service.
    ///
    /// Also computes the shared dummy hash, so the first failed login does
    /// not pay for it.
    pub fn new() -> Self {
        if LazyLock::force(&DUMMY_HASH).is_none() {
            tracing::error!(
                target: TRACING_TARGET,
                "failed to compute the dummy password hash"
            );
        }

        Self::create()
    }

    fn create() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// Returns a PHC string that embeds the algorithm, parameters and salt,
    /// suitable for storing in `users.password_hash`.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InternalServerError` if salt generation or
    /// hashing fails.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::try_from_rng(&mut OsRng).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to generate password salt"
            );

            ErrorKind::InternalServerError
                .with_context("Salt generation error")
                .with_resource("authentication")
        })?;

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing failed"
                );

                ErrorKind::InternalServerError
                    .with_context("Hash generation error")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC hash.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::InvalidCredentials` when the password does not match.
    ///   The error carries no detail, so it is indistinguishable from the
    ///   unknown-email case.
    /// - `ErrorKind::InternalServerError` when the stored hash is unreadable.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "stored password hash has an invalid format"
            );

            ErrorKind::InternalServerError
                .with_context("Hash format error")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    "password verification failed"
                );

                Err(ErrorKind::InvalidCredentials.into_error())
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification system error"
                );

                Err(ErrorKind::InternalServerError
                    .with_context("Verification error")
                    .with_resource("authentication"))
            }
        }
    }

    /// Burns the same amount of work as a real verification.
    ///
    /// Called when the email is unknown, so the response time does not
    /// reveal which accounts exist. Runs exactly one Argon2 verification
    /// against a hash computed once per process. Always returns `false`.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        if let Some(dummy_hash) = Self::dummy_hash() {
            let _ = self.verify_password(password, dummy_hash);
        }

        false
    }

    fn dummy_hash() -> Option<&'static str> {
        DUMMY_HASH.as_deref()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context as _;

    use super::*;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("Secret123!")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("Secret123!", &hash).is_ok());
        assert!(hasher.verify_password("Secret123", &hash).is_err());
        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();

        let hash1 = hasher.hash_password("Secret123!")?;
        let hash2 = hasher.hash_password("Secret123!")?;

        assert_ne!(hash1, hash2);
        Ok(())
    }

    #[test]
    fn wrong_password_is_invalid_credentials() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct-horse-1!")?;

        let error = hasher
            .verify_password("battery-staple-2!", &hash)
            .expect_err("wrong password must fail");
        assert_eq!(error.kind(), ErrorKind::InvalidCredentials);
        assert!(error.context().is_none());
        Ok(())
    }

    #[test]
    fn unreadable_hash_is_internal_error() {
        let hasher = PasswordHasher::new();

        let error = hasher
            .verify_password("Secret123!", "not_a_valid_hash_format")
            .expect_err("invalid hash must fail");
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn dummy_verification_never_succeeds() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_dummy_password("Secret123!"));
    }

    #[test]
    fn dummy_hash_is_computed_once() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let before = PasswordHasher::dummy_hash().context("dummy hash")?;

        hasher.verify_dummy_password("Secret123!");
        hasher.verify_dummy_password("Other456?");

        let after = PasswordHasher::dummy_hash().context("dummy hash")?;
        assert!(std::ptr::eq(before, after));
        Ok(())
    }

    #[test]
    fn dummy_hash_matches_real_hash_cost() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let real = hasher.hash_password("Secret123!")?;
        let dummy = PasswordHasher::dummy_hash().context("dummy hash")?;

        let real = PasswordHash::new(&real).map_err(|e| anyhow::anyhow!("{e}"))?;
        let dummy = PasswordHash::new(dummy).map_err(|e| anyhow::anyhow!("{e}"))?;
        assert_eq!(real.algorithm, dummy.algorithm);
        assert_eq!(real.version, dummy.version);
        assert_eq!(real.params, dummy.params);
        Ok(())
    }
}
