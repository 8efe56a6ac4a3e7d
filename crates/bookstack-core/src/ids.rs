//! Core identifier types for bookstack.
//!
//! This module provides strongly-typed identifiers for users, categories, and
//! books. All IDs wrap a `u64` allocated by the store's per-entity counters,
//! and display in decimal: the session cookie value is literally the
//! decimal form of a `UserId`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input was empty.
    #[error("empty identifier")]
    Empty,

    /// The input was not a decimal number.
    #[error("invalid identifier: {0:?}")]
    Invalid(String),
}

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an identifier from its numeric value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the underlying numeric value.
            #[must_use]
            pub const fn as_u64(self) -> u64 {
                self.0
            }

            /// Return the big-endian byte encoding used for store keys.
            ///
            /// Big-endian keeps RocksDB prefix scans in numeric order.
            #[must_use]
            pub const fn to_be_bytes(self) -> [u8; 8] {
                self.0.to_be_bytes()
            }

            /// Decode an identifier from its big-endian store-key form.
            #[must_use]
            pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
                Self(u64::from_be_bytes(bytes))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    return Err(IdError::Empty);
                }
                s.parse::<u64>()
                    .map(Self)
                    .map_err(|_| IdError::Invalid(s.to_string()))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

id_type! {
    /// A user identifier.
    ///
    /// User IDs double as session token values: the `TOKEN` cookie carries
    /// the decimal form of the authenticated user's ID.
    UserId
}

id_type! {
    /// A category identifier.
    CategoryId
}

id_type! {
    /// A book identifier.
    ///
    /// Book IDs stay addressable after soft deletion so aggregate counts
    /// can still account for deleted rows.
    BookId
}
