//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`legalai_core::Error`] so that route
//! handlers can return `Result<T, AppError>` and use `?` on core results.
//!
//! The JSON body is finalised by the request ID middleware, which stamps the
//! request ID and, in debug mode, the detail of server errors. Handlers only
//! attach an [`ErrorBody`] to the response extensions.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: legalai_core::Error,
}

impl AppError {
    pub fn new(inner: legalai_core::Error) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &legalai_core::Error {
        &self.inner
    }
}

impl From<legalai_core::Error> for AppError {
    fn from(e: legalai_core::Error) -> Self {
        Self::new(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(legalai_core::Error::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(legalai_core::Error::Validation(rejection.body_text()))
    }
}

/// The parts of an error response, kept on the response until the request ID
/// middleware renders the final body.
#[derive(Debug, Clone)]
pub struct ErrorBody {
    pub status: StatusCode,
    pub message: String,
    pub code: &'static str,
    /// Underlying error text for server errors. Only shown in debug mode.
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Render the JSON body sent to the client.
    pub fn to_json(&self, request_id: Option<&str>, debug: bool) -> serde_json::Value {
        let mut body = json!({
            "message": self.message,
            "code": self.code,
            "request_id": request_id,
        });
        if debug {
            if let Some(detail) = &self.detail {
                body["detail"] = json!(detail);
            }
        }
        body
    }
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        let status = StatusCode::from_u16(err.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            Self {
                status,
                message: "Internal server error".into(),
                code: err.inner.code(),
                detail: Some(err.inner.to_string()),
            }
        } else {
            Self {
                status,
                message: err.inner.to_string(),
                code: err.inner.code(),
                detail: None,
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody::from(&self);

        if body.status.is_server_error() {
            tracing::error!(
                status = %body.status,
                error = %self.inner,
                "Server error in API handler"
            );
        } else {
            tracing::debug!(status = %body.status, error = %self.inner, "Request rejected");
        }

        let mut response = (body.status, axum::Json(body.to_json(None, false))).into_response();
        response.extensions_mut().insert(body);
        response
    }
}
