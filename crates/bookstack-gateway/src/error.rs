//! API error types and responses.
//!
//! This module defines the standard error envelope for all API responses.
//! Every error body carries `{"status": "Error", "message": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use bookstack_auth::AuthError;
use bookstack_control::ControlError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, or stale session token.
    #[error("unauthorized")]
    Unauthorized,

    /// The caller's role does not permit the operation, or credentials
    /// were rejected at login.
    #[error("{0}")]
    Forbidden(String),

    /// The requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with existing records.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error")]
    Internal,
}

/// Error envelope body.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    status: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorEnvelope {
            status: "Error",
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken
            | AuthError::MalformedToken(_)
            | AuthError::UnknownIdentity => Self::Unauthorized,
            AuthError::InvalidCredentials => Self::Forbidden("No user found.".to_string()),
            AuthError::Hashing(_) | AuthError::Store(_) => {
                tracing::error!(error = %err, "Auth internal error");
                Self::Internal
            }
        }
    }
}

impl From<ControlError> for ApiError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::UserNotFound(id) => Self::NotFound(format!("user {id}")),
            ControlError::CategoryNotFound(id) => Self::NotFound(format!("category {id}")),
            ControlError::BookNotFound(id) => Self::NotFound(format!("book {id}")),
            ControlError::UsernameTaken(name) => {
                Self::Conflict(format!("username {name} already taken"))
            }
            ControlError::NotPermitted => Self::Forbidden("operation not permitted".to_string()),
            ControlError::Auth(auth_err) => Self::from(auth_err),
            ControlError::Store(store_err) => {
                tracing::error!(error = %store_err, "Store error");
                Self::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("nope".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("book 3".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("username taken".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn login_failure_maps_to_forbidden_with_fixed_message() {
        let err = ApiError::from(AuthError::InvalidCredentials);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "No user found.");
    }

    #[test]
    fn stale_token_maps_to_unauthorized() {
        let err = ApiError::from(AuthError::UnknownIdentity);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
