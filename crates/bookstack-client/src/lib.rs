#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Client library for the bookstack API.
//!
//! Three pieces cooperate here:
//!
//! - [`ApiClient`] talks HTTP to the gateway, carrying the session
//!   token in the `TOKEN` cookie on every request;
//! - [`AuthGate`] re-verifies the session on every navigation and
//!   decides whether to proceed or redirect to the login page;
//! - [`CollectionCache`] and [`DashboardCache`] hold fetched records
//!   and apply mutations optimistically, so views update without a
//!   round trip; [`BooksSection`] binds the two to a signed-in
//!   identity and invalidates the dashboard on admin mutations.

mod cache;
mod client;
mod gate;
mod section;
mod types;

pub use cache::{CollectionCache, DashboardCache, Keyed};
pub use client::{ApiClient, ClientError, Result, TokenTransport};
pub use gate::{AuthGate, GateState, Navigation};
pub use section::BooksSection;
pub use types::{AuthorTotal, BookRecord, CategoryRecord, Totals, UserRecord};
