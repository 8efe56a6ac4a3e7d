//! Core types and identifiers for bookstack.
//!
//! This crate provides the foundational types used throughout the bookstack
//! records manager:
//!
//! - **Identifiers**: Strongly-typed numeric IDs for users, categories, and books
//! - **Roles**: The role enum that drives visibility rules
//!
//! # Example
//!
//! ```
//! use bookstack_core::{UserId, Role};
//!
//! // Parse a user ID from its decimal form (the session cookie value)
//! let user_id: UserId = "7".parse().unwrap();
//! assert_eq!(user_id.as_u64(), 7);
//!
//! assert!(Role::Admin.is_admin());
//! assert!(!Role::User.is_admin());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod role;

pub use ids::{BookId, CategoryId, IdError, UserId};
pub use role::Role;
