//! Session verification and login authentication for bookstack.
//!
//! This crate provides the cookie-session authentication pieces:
//!
//! - **Session tokens**: the opaque cookie value (a user's primary key)
//! - **Verification**: resolving a token to an [`Identity`] on every page load
//! - **Login**: credential checking with argon2 password hashes
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────────┐
//! │   Gateway        │────▶│  IdentityVerifier    │
//! │   (HTTP)         │     │  (trait)             │
//! └──────────────────┘     └──────────┬───────────┘
//!                                     │
//!                          ┌──────────▼───────────┐
//!                          │   StoreVerifier      │
//!                          │   (record store)     │
//!                          └──────────────────────┘
//! ```
//!
//! Verification is stateless and read-only: the token's 3600-second
//! lifetime is enforced entirely by the cookie transport, never tracked
//! server-side, so the two can never disagree about expiry.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bookstack_auth::{IdentityVerifier, StoreVerifier};
//! use bookstack_store::RocksStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RocksStore::open("/tmp/bookstack-db")?);
//! let verifier = StoreVerifier::new(store);
//!
//! // In a request handler:
//! let identity = verifier.verify("7").await?;
//! println!("Hello, {} ({})", identity.first_name, identity.role);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod login;
pub mod password;
pub mod token;
pub mod verify;

pub use error::{AuthError, Result};
pub use login::authenticate;
pub use password::{hash_password, verify_password};
pub use token::{SessionToken, SESSION_MAX_AGE_SECS, TOKEN_COOKIE};
pub use verify::{Identity, IdentityVerifier, StoreVerifier};

#[cfg(any(test, feature = "test-utils"))]
pub use verify::MockVerifier;
