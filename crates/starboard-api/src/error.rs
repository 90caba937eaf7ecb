use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use starboard_db::DbError;
use starboard_types::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Store(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_body() -> Self {
        Self::Validation("Invalid request body".into())
    }

    /// Prefix store-level failures with what the handler was doing.
    pub fn context(self, what: &str) -> Self {
        match self {
            Self::Store(msg) => Self::Store(format!("{}: {}", what, msg)),
            Self::Conflict(msg) => Self::Conflict(format!("{}: {}", what, msg)),
            other => other,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) | DbError::MissingReference(what) => {
                Self::NotFound(format!("{} not found", what))
            }
            DbError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Store(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
