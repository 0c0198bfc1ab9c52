use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sirn_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Every failure a handler can see comes out of the board layer already
/// classified, so this only wraps [`CoreError`] and renders it as the
/// `{ "error", "code" }` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from the board layer or the caller extractors.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Core(core) = self;
        let (status, code, message) = core_status(core);

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a [`CoreError`] to an HTTP status, error code and client message.
fn core_status(err: CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::StoreUnavailable(msg) => {
            tracing::warn!(error = %msg, "Store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                "The data store is temporarily unavailable".to_string(),
            )
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
