//! HTTP gateway for the bookstack records service.
//!
//! This crate provides the public-facing API for the records manager.
//! It handles:
//!
//! - Cookie-carried session authentication
//! - REST HTTP endpoints for users, categories, and books
//! - The admin dashboard totals endpoint
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients                              │
//! │                 (browser / bookstack-client)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Cookie: TOKEN=<id>
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    bookstack-gateway                        │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐   │
//! │  │  Session    │ │   Router    │ │    Response         │   │
//! │  │  Extractor  │ │  + Handlers │ │    Envelope         │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┼──────────────┐
//!               ▼              ▼              ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │ Records  │   │  Auth    │   │  Rocks   │
//!        │ Service  │   │ Verifier │   │  Store   │
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bookstack_gateway::{GatewayConfig, GatewayState, create_router};
//! use bookstack_control::RecordsService;
//! use bookstack_auth::StoreVerifier;
//! use bookstack_store::RocksStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RocksStore::open("/tmp/bookstack")?);
//! let records = Arc::new(RecordsService::new(Arc::clone(&store)));
//! let verifier = Arc::new(StoreVerifier::new(store));
//!
//! let state = GatewayState::new(records, verifier, GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod cookie;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use auth::SessionUser;
pub use config::GatewayConfig;
pub use error::ApiError;
pub use response::Envelope;
pub use routes::create_router;
pub use state::GatewayState;
