//! Password hashing.
//!
//! Passwords are stored as argon2 PHC strings with a random per-password
//! salt. The source system this replaces compared plaintext; hashed
//! comparison is a strict improvement with identical observable behavior.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::error::{AuthError, Result};

/// Hash a password into an argon2 PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hashing` if salt generation or hashing fails.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;

    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .to_string();

    Ok(phc)
}

/// Verify a password against a stored PHC string.
///
/// An unparseable hash verifies as false rather than erroring; a corrupt
/// hash must never authenticate anyone.
#[must_use]
pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password(&hash, "hunter2"));
        assert!(!verify_password(&hash, "hunter3"));
    }

    #[test]
    fn salts_are_random() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }
}
