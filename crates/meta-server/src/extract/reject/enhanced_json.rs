//! JSON body extractor and response.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// JSON extractor and response with structured rejections.
///
/// Rejects with `400 BadRequest` for syntax errors, type mismatches, a wrong
/// content type or an oversized body. Also used as the response wrapper so
/// handlers import a single `Json`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Wraps a value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the wrapped value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Invalid request data format")
                .with_context(sanitize_error_message(&err.body_text(), 200)),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_context(sanitize_error_message(&err.body_text(), 200)),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Invalid content type")
                .with_context("Content-Type must be application/json"),
            JsonRejection::BytesRejection(err) => {
                let message = err.body_text();
                if message.contains("length limit") {
                    ErrorKind::BadRequest
                        .with_message("Request body too large")
                        .with_context("Request body exceeds the size limit of this service")
                } else {
                    ErrorKind::BadRequest
                        .with_message("Failed to read request body")
                        .with_context(sanitize_error_message(&message, 200))
                }
            }
            other => {
                tracing::error!(rejection = %other.body_text(), "unexpected JSON rejection");
                ErrorKind::InternalServerError.with_message("Request processing failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::post;
    use axum_test::TestServer;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Payload {
        count: u32,
    }

    async fn echo(Json(payload): Json<Payload>) -> Json<Payload> {
        Json(payload)
    }

    fn server() -> anyhow::Result<TestServer> {
        let router = Router::new().route("/", post(echo));
        Ok(TestServer::new(router)?)
    }

    #[tokio::test]
    async fn accepts_well_formed_body() -> anyhow::Result<()> {
        let server = server()?;
        let response = server.post("/").json(&serde_json::json!({ "count": 3 })).await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "count": 3 }));
        Ok(())
    }

    #[tokio::test]
    async fn rejects_type_mismatch_as_bad_request() -> anyhow::Result<()> {
        let server = server()?;
        let response = server.post("/").json(&serde_json::json!({ "count": "three" })).await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "bad_request");
        Ok(())
    }

    #[tokio::test]
    async fn rejects_missing_content_type() -> anyhow::Result<()> {
        let server = server()?;
        let response = server.post("/").text(r#"{"count":1}"#).await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["context"], "Content-Type must be application/json");
        Ok(())
    }
}
