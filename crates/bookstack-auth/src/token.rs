//! Session token codec.
//!
//! The session token is the authenticated user's primary key, carried in a
//! cookie. The codec is stateless: issuance writes the cookie, expiry is
//! the cookie's `Max-Age`, and nothing about the token is tracked
//! server-side.

use std::fmt;
use std::str::FromStr;

use bookstack_core::{IdError, UserId};

use crate::error::AuthError;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "TOKEN";

/// Session lifetime in seconds, enforced by the cookie transport.
pub const SESSION_MAX_AGE_SECS: u64 = 3600;

/// An opaque session token: the decimal primary key of a user.
///
/// Clients hold but never inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(UserId);

impl SessionToken {
    /// Issue a token for a user.
    #[must_use]
    pub const fn for_user(user_id: UserId) -> Self {
        Self(user_id)
    }

    /// Parse a token from a cookie value.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingToken` for empty input (without any store
    /// involvement) and `AuthError::MalformedToken` for anything that is
    /// not a decimal user ID.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match UserId::from_str(value) {
            Ok(user_id) => Ok(Self(user_id)),
            Err(IdError::Empty) => Err(AuthError::MissingToken),
            Err(IdError::Invalid(s)) => Err(AuthError::MalformedToken(s)),
        }
    }

    /// The user this token identifies.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
