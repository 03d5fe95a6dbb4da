use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// HTTP error response body.
///
/// Every failure on both surfaces renders as this shape, so clients can
/// branch on `name` without parsing the human-readable `message`.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// User-friendly error message safe for client display
    pub message: Cow<'a, str>,
    /// The resource that the error relates to (optional, set by handler)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Additional detail for the client (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 400 Bad Request
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const EMAIL_TAKEN: Self = Self::new(
        "email_taken",
        "User already exists with this email",
        StatusCode::BAD_REQUEST,
    );
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "Invalid request: missing required parameters",
        StatusCode::BAD_REQUEST,
    );
    pub const VALIDATION_ERROR: Self = Self::new(
        "validation_error",
        "The request data failed validation",
        StatusCode::BAD_REQUEST,
    );

    // 401 Unauthorized
    pub const AUTHENTICATION_REQUIRED: Self = Self::new(
        "authentication_required",
        "Authentication required",
        StatusCode::UNAUTHORIZED,
    );
    pub const INVALID_CREDENTIALS: Self = Self::new(
        "invalid_credentials",
        "Invalid email or password",
        StatusCode::UNAUTHORIZED,
    );
    pub const INVALID_TOKEN: Self = Self::new(
        "invalid_token",
        "Invalid or expired token",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_TOKEN: Self = Self::new(
        "missing_token",
        "Access token required",
        StatusCode::UNAUTHORIZED,
    );
    pub const STALE_IDENTITY: Self = Self::new(
        "stale_identity",
        "User not found or inactive",
        StatusCode::UNAUTHORIZED,
    );

    // 403 Forbidden
    pub const FORBIDDEN: Self = Self::new("forbidden", "Access denied", StatusCode::FORBIDDEN);
    pub const FORBIDDEN_SELF_ACTION: Self = Self::new(
        "forbidden_self_action",
        "This action cannot be applied to your own account",
        StatusCode::FORBIDDEN,
    );
    pub const INSUFFICIENT_PERMISSIONS: Self = Self::new(
        "insufficient_permissions",
        "Insufficient permissions",
        StatusCode::FORBIDDEN,
    );

    // Other 4xx Client Errors
    pub const CONFLICT: Self = Self::new(
        "conflict",
        "The request conflicts with the current state of the resource",
        StatusCode::CONFLICT,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const TOO_MANY_REQUESTS: Self = Self::new(
        "too_many_requests",
        "Too many requests. Please slow down and try again later",
        StatusCode::TOO_MANY_REQUESTS,
    );

    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "The service is temporarily unavailable. Please try again later",
        StatusCode::SERVICE_UNAVAILABLE,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Sets the resource, joining with any existing one by `/`.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Appends the new message to the existing message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        let new_message = message.into();
        self.message = Cow::Owned(format!("{}. {}", self.message, new_message));
        self
    }

    /// Attaches context, joining with any existing context by `; `.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_merging_resource() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("admin")
            .with_resource("course");

        assert_eq!(response.resource.as_deref(), Some("admin/course"));
    }

    #[test]
    fn error_response_merging_message() {
        let response = ErrorResponse::BAD_REQUEST
            .with_message("Invalid format")
            .with_message("Missing required field");

        assert_eq!(
            &response.message,
            "The request could not be processed due to invalid data. Invalid format. Missing required field"
        );
    }

    #[test]
    fn error_response_merging_context() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("Database connection failed")
            .with_context("Pool exhausted");

        assert_eq!(
            response.context.as_deref(),
            Some("Database connection failed; Pool exhausted")
        );
    }

    #[test]
    fn error_response_serialization() -> anyhow::Result<()> {
        let response = ErrorResponse::INVALID_TOKEN.with_resource("authentication");
        let json = serde_json::to_value(&response)?;

        assert_eq!(json["name"], "invalid_token");
        assert_eq!(json["message"], "Invalid or expired token");
        assert_eq!(json["resource"], "authentication");
        assert!(json.get("context").is_none());
        assert!(json.get("status").is_none());
        Ok(())
    }

    #[test]
    fn auth_failures_share_unauthorized_status() {
        for response in [
            ErrorResponse::MISSING_TOKEN,
            ErrorResponse::INVALID_TOKEN,
            ErrorResponse::STALE_IDENTITY,
            ErrorResponse::INVALID_CREDENTIALS,
            ErrorResponse::AUTHENTICATION_REQUIRED,
        ] {
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        }
    }
}
