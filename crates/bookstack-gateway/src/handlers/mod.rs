//! HTTP request handlers.
//!
//! This module contains all the endpoint handlers for the gateway API.

pub mod books;
pub mod categories;
pub mod health;
pub mod session;
pub mod users;
