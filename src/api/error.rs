//! Maps domain errors onto HTTP responses.

use super::response::ApiResponse;
use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Error returned by handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Failure from the business layer
    #[error(transparent)]
    Core(#[from] Error),

    /// Request body or query string could not be read
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(err) => match err {
                Error::Validation { .. }
                | Error::InvalidAmount { .. }
                | Error::InvalidQuantity { .. }
                | Error::InvalidPhase { .. }
                | Error::InvalidStatus { .. }
                | Error::InvalidPeriod { .. } => StatusCode::BAD_REQUEST,
                Error::RestaurantNotFound { .. }
                | Error::CategoryNotFound { .. }
                | Error::ProductNotFound { .. }
                | Error::OrderNotFound { .. } => StatusCode::NOT_FOUND,
                Error::IllegalTransition { .. } => StatusCode::CONFLICT,
                Error::Config { .. } | Error::Database(_) | Error::Io(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

/// Handler result
pub type ApiResult<T> = std::result::Result<T, ApiError>;
