//! Authentication error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during authentication and verification.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session token was presented.
    #[error("missing session token")]
    MissingToken,

    /// The session token is not a valid user ID.
    #[error("malformed session token: {0}")]
    MalformedToken(String),

    /// The token parsed but resolves to no stored user.
    ///
    /// Collapses to the same caller-visible outcome as a missing token;
    /// no distinct "orphaned token" surface exists.
    #[error("unknown identity")]
    UnknownIdentity,

    /// Login credentials did not match any user.
    ///
    /// A rejection, not a fault: surfaced inline at the login form.
    #[error("no user found")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Storage layer error.
    #[error("storage error: {0}")]
    Store(#[from] bookstack_store::StoreError),
}

impl AuthError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingToken | Self::MalformedToken(_) | Self::UnknownIdentity => 401,
            Self::InvalidCredentials => 403,
            Self::Hashing(_) | Self::Store(_) => 500,
        }
    }
}
