use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use spendcap_core::errors::{DatabaseError, Error as CoreError};
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::ConstraintViolation(_)
                | CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
                // A foreign key failure means the referenced owner or category is gone.
                CoreError::NotFound(_)
                | CoreError::Database(DatabaseError::NotFound(_))
                | CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => {
                    StatusCode::NOT_FOUND
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) | ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized("Unauthorized".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use spendcap_core::errors::ValidationError;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let cases = [
            (
                ApiError::from(CoreError::Validation(ValidationError::MissingField(
                    "limit".into(),
                ))),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(CoreError::ConstraintViolation("dup".into())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(CoreError::Database(DatabaseError::UniqueViolation(
                    "dup".into(),
                ))),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(CoreError::NotFound("Budget".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(CoreError::Database(DatabaseError::ForeignKeyViolation(
                    "FOREIGN KEY constraint failed".into(),
                ))),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(CoreError::Database(DatabaseError::QueryFailed("boom".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
