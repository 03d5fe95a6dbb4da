//! Token verification error to HTTP error conversion.
//!
//! Every verification failure is an `InvalidToken`; the context only hints at
//! the cause and never echoes token contents.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};

use crate::handler::{Error, ErrorKind};

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        let context = match error.kind() {
            JwtErrorKind::ExpiredSignature => "Token has expired",
            JwtErrorKind::InvalidSignature => "Token signature could not be verified",
            JwtErrorKind::InvalidIssuer => "Token was not issued by this service",
            JwtErrorKind::InvalidAlgorithm => "Token was signed with an unsupported algorithm",
            JwtErrorKind::MissingRequiredClaim(_) => "Token is missing a required claim",
            JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) | JwtErrorKind::Json(_) => {
                "Token is malformed"
            }
            _ => "Token could not be verified",
        };

        ErrorKind::InvalidToken
            .with_context(context)
            .with_resource("authentication")
    }
}
