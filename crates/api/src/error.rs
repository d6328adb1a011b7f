use std::time::Duration;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use dna_core::error::CoreError;
use dna_store::StoreError;

use crate::response::ErrorResponse;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as the `{ "success": false, "error": ... }`
/// envelope. The HTTP status is 200 unless typed status codes are enabled,
/// in which case [`apply_error_status`] swaps in [`AppError::status_code`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `dna_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the table or object store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed request (bad JSON, missing multipart field).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A business rule was not met. The message is shown verbatim.
    #[error("{0}")]
    Workflow(&'static str),

    /// The request did not finish within the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status an error would carry under typed status codes.
///
/// Attached to every error response as an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorStatus(pub StatusCode);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Store(store) => match store {
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::Api { status: 404, .. } => StatusCode::NOT_FOUND,
                StoreError::Api { status: 400..=499, .. } => StatusCode::BAD_REQUEST,
                StoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                err if err.is_upstream() => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) | AppError::Workflow(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Map an error surfaced by the timeout middleware.
    pub fn from_middleware(err: BoxError, timeout: Duration) -> Self {
        if err.is::<tower::timeout::error::Elapsed>() {
            AppError::Timeout(timeout.as_secs())
        } else {
            AppError::Core(CoreError::Internal(err.to_string()))
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(err) => tracing::error!(error = %err, "Store operation failed"),
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error")
            }
            other => tracing::warn!(error = %other, "Request failed"),
        }

        let status = self.status_code();
        let mut response = axum::Json(ErrorResponse::new(self.to_string())).into_response();
        response.extensions_mut().insert(ErrorStatus(status));
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

/// Response middleware: under typed status codes, rewrite the status of
/// error envelopes to the one recorded in [`ErrorStatus`].
pub async fn apply_error_status(State(typed): State<bool>, mut response: Response) -> Response {
    if typed {
        if let Some(ErrorStatus(status)) = response.extensions().get::<ErrorStatus>().copied() {
            *response.status_mut() = status;
        }
    }
    response
}
