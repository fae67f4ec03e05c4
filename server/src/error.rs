//! Mapping of store failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use crudstore_storage::StoreError;
use serde_json::json;
use tracing::error;

/// Error returned by the HTTP handlers.
///
/// Rendered as `{"error": "<message>"}` with a status that lets clients tell
/// their own unmet deadline apart from a server fault.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed path, header or body.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::DeadlineExceeded) => StatusCode::GATEWAY_TIMEOUT,
            Self::Store(StoreError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
