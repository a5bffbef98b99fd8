//! Error types for the HTTP API.
//!
//! ## Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | `Core` (validation, search parameters) | 400 |
//! | `BadRequest` (body or query decoding) | 400 |
//! | `Db(MissingId)` | 400 |
//! | `Db(_)` | 500 |
//!
//! Every error body is `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coffee_core::{CoreError, ValidationError};
use coffee_db::DbError;
use serde_json::json;
use tracing::{debug, error};

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("{0}")]
    BadRequest(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Core(err.into())
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Db(err) => match err.root() {
                DbError::MissingId => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use coffee_db::DbResultExt;

    #[test]
    fn test_status_codes() {
        let core: ApiError = ValidationError::OffsetNegative.into();
        assert_eq!(core.status_code(), StatusCode::BAD_REQUEST);

        let missing: ApiError = DbError::MissingId.into();
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

        let failed: ApiError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(failed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_context_does_not_hide_missing_id() {
        let wrapped = Err::<(), _>(DbError::MissingId)
            .context("Drink delete failed")
            .unwrap_err();
        assert_eq!(ApiError::from(wrapped).status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_message_is_passed_through() {
        let err = ApiError::Core(CoreError::InvalidPrice(ValidationError::MoneyFormat));
        assert_eq!(
            err.to_string(),
            "Validation for price failed: Unrecognized format for money"
        );
    }
}
