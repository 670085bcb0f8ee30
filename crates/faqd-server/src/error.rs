//! API error reporting

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use faqd_core::Error;

/// Wrapper that turns a core error into an HTTP response.
///
/// Every error surfaces to the caller with its display text; nothing is
/// swallowed at the handler layer.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

/// Status code for each error class: caller mistakes map to 4xx, upstream
/// dependency failures to 502, everything else to 500.
pub(crate) fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::NoIndex(_) => StatusCode::CONFLICT,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::Timeout(_)
        | Error::Network(_)
        | Error::Authentication(_)
        | Error::LLMProvider(_)
        | Error::EmbeddingProvider(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
