//! Security services: password hashing and policy, token signing, and
//! request rate limiting.

mod password_hasher;
mod password_policy;
mod rate_limiter;
mod token_codec;

pub use password_hasher::PasswordHasher;
pub use password_policy::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, validate_password};
pub use rate_limiter::{
    InMemoryRateLimitStore, RateLimitDecision, RateLimitKey, RateLimitPolicy, RateLimitStore,
};
pub use token_codec::{
    AuthClaims, INSECURE_DEFAULT_SECRET, TokenCodec, TokenConfig, TokenSubject,
};
