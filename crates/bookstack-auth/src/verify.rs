//! Token verification and identity resolution.
//!
//! This module provides the `IdentityVerifier` trait used on every page
//! load to decide whether a caller is who they claim to be.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use bookstack_core::{Role, UserId};
use bookstack_store::Store;

use crate::error::{AuthError, Result};
use crate::token::SessionToken;

/// The resolved, authenticated caller.
///
/// Derived read-only from the record store at verification time; never
/// persisted client-side beyond the current page lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The user's primary key (and session token value).
    #[serde(rename = "id")]
    pub user_id: UserId,
    /// Given name.
    #[serde(rename = "firstName")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// Role driving visibility.
    pub role: Role,
}

impl Identity {
    /// Whether this identity carries administrative privileges.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Trait for resolving a session token to an identity.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve a token to an identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is absent, malformed, or resolves to
    /// no stored user. Callers must treat every error as unauthenticated.
    async fn verify(&self, token: &str) -> Result<Identity>;
}

/// Record-store-backed verifier.
///
/// Stateless and read-only: no lifetime is enforced here. Expiry belongs
/// entirely to the cookie transport, so in-process and transport TTLs can
/// never diverge.
pub struct StoreVerifier<S: Store> {
    store: Arc<S>,
}

impl<S: Store> StoreVerifier<S> {
    /// Create a verifier over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: Store + 'static> IdentityVerifier for StoreVerifier<S> {
    async fn verify(&self, token: &str) -> Result<Identity> {
        // Empty tokens short-circuit before any store query.
        let token = SessionToken::parse(token)?;

        let user = self
            .store
            .get_user(&token.user_id())?
            .ok_or(AuthError::UnknownIdentity)?;

        tracing::debug!(user_id = %user.user_id, role = %user.role, "session verified");

        Ok(Identity {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
        })
    }
}

/// A mock verifier for testing.
///
/// Resolves tokens from an in-memory table registered by the test.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Default)]
pub struct MockVerifier {
    identities: parking_lot::RwLock<std::collections::HashMap<String, Identity>>,
    /// When set, every call fails as if the backend were unreachable.
    pub fail_all: std::sync::atomic::AtomicBool,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockVerifier {
    /// Register an identity under a token value.
    pub fn register(&self, token: impl Into<String>, identity: Identity) {
        self.identities.write().insert(token.into(), identity);
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl IdentityVerifier for MockVerifier {
    async fn verify(&self, token: &str) -> Result<Identity> {
        if self.fail_all.load(std::sync::atomic::Ordering::Relaxed) {
            return Err(AuthError::Store(bookstack_store::StoreError::Database(
                "mock backend down".to_string(),
            )));
        }
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.identities
            .read()
            .get(token)
            .cloned()
            .ok_or(AuthError::UnknownIdentity)
    }
}
