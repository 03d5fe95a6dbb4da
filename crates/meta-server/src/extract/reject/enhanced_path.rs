//! Path parameter extractor.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Path extractor with structured rejections.
///
/// A path segment that does not parse (most often a malformed UUID) rejects
/// with `400 BadRequest` and a hint about the expected format.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Returns the wrapped value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let message = err.body_text();
                ErrorKind::BadRequest
                    .with_message("Invalid path parameter format")
                    .with_context(format!(
                        "{}. {}",
                        sanitize_error_message(&message, 150),
                        format_hint(&message)
                    ))
            }
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_context(sanitize_error_message(&err.body_text(), 150)),
            other => {
                tracing::error!(rejection = %other.body_text(), "unexpected path rejection");
                ErrorKind::InternalServerError.with_message("Path processing failed")
            }
        }
    }
}

/// Picks a format hint from the deserializer message.
fn format_hint(message: &str) -> &'static str {
    let message = message.to_lowercase();

    if message.contains("uuid") || message.contains("invalid character") {
        "Identifiers must be UUIDs such as 0190a6e4-7b1c-7c3e-9f00-000000000000"
    } else if message.contains("invalid digit") || message.contains("cannot parse") {
        "Numeric parameters must contain only digits"
    } else {
        "Check that the parameter matches the expected type"
    }
}
