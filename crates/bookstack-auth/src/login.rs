//! Login credential checking.

use bookstack_store::{Store, User};

use crate::error::{AuthError, Result};
use crate::password::verify_password;

/// Authenticate a username/password pair against the record store.
///
/// Returns the matching user on success. A missing user and a wrong
/// password are indistinguishable to the caller: both are
/// `AuthError::InvalidCredentials`, a rejection rather than a fault.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` when no user matches, or a
/// storage error if the lookup itself fails.
pub fn authenticate<S: Store>(store: &S, username: &str, password: &str) -> Result<User> {
    let Some(user) = store.find_user_by_username(username)? else {
        tracing::debug!(username, "login rejected: unknown username");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(&user.password_hash, password) {
        tracing::debug!(username, "login rejected: bad password");
        return Err(AuthError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.user_id, "login accepted");
    Ok(user)
}
