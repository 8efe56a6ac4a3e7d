//! Control-plane error types.

use bookstack_auth::AuthError;
use bookstack_core::{BookId, CategoryId, UserId};
use bookstack_store::StoreError;
use thiserror::Error;

/// Errors returned by the records service.
#[derive(Debug, Error)]
pub enum ControlError {
    /// No user exists with the given id.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// No category exists with the given id.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// No book exists with the given id.
    #[error("book not found: {0}")]
    BookNotFound(BookId),

    /// Another user already holds the requested username.
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// The caller's role does not permit the operation.
    #[error("operation not permitted for this role")]
    NotPermitted,

    /// Authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ControlError {
    /// HTTP status code appropriate for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::UserNotFound(_) | Self::CategoryNotFound(_) | Self::BookNotFound(_) => 404,
            Self::UsernameTaken(_) => 409,
            Self::NotPermitted => 403,
            Self::Auth(err) => err.http_status_code(),
            Self::Store(StoreError::NotFound) => 404,
            Self::Store(_) => 500,
        }
    }
}

/// Convenience result alias for control operations.
pub type Result<T> = std::result::Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ControlError::UserNotFound(UserId::new(3)).http_status_code(),
            404
        );
        assert_eq!(
            ControlError::UsernameTaken("admin".into()).http_status_code(),
            409
        );
        assert_eq!(ControlError::NotPermitted.http_status_code(), 403);
        assert_eq!(
            ControlError::Auth(AuthError::InvalidCredentials).http_status_code(),
            403
        );
        assert_eq!(
            ControlError::Store(StoreError::Database("io".into())).http_status_code(),
            500
        );
    }
}
