#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! Records service for bookstack.
//!
//! Sits between the HTTP gateway and the store. Every operation takes
//! the verified [`Identity`](bookstack_auth::Identity) of the caller
//! and enforces role gates before touching persistence:
//!
//! - user and category administration, and the dashboard totals, are
//!   restricted to `ADMIN` callers;
//! - book listings are narrowed for `USER` callers to the categories
//!   linked to their account.
//!
//! The user/category association is maintained by a pure reconciler
//! ([`reconcile`]) that diffs the stored link set against the desired
//! one and emits a disconnect/connect plan. The service applies the
//! plan with disconnects strictly before connects, then re-reads the
//! stored state so callers always observe what was actually persisted.

mod error;
mod reconcile;
mod service;
mod types;

pub use error::{ControlError, Result};
pub use reconcile::{reconcile, ReconcilePlan};
pub use service::{Records, RecordsService};
pub use types::{
    BookTotals, CreateBookRequest, CreateUserRequest, UpdateBookRequest, UpdateUserRequest,
    UserRecord,
};
