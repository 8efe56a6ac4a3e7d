//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use bookstack_auth::IdentityVerifier;
use bookstack_control::Records;

use crate::handlers::{books, categories, health, session, users};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `POST /api/login` - Check credentials and set the session cookie
/// - `POST /api/logout` - Clear the session cookie
///
/// ## Authenticated (session cookie)
/// - `GET /api/whoami` - Resolve the session to an identity
/// - `GET /api/users` - List users (ADMIN)
/// - `POST /api/users` - Create user (ADMIN)
/// - `PUT /api/users/:user_id` - Update user and its category links (ADMIN)
/// - `GET /api/categories` - List categories
/// - `POST /api/categories` - Create category (ADMIN)
/// - `PUT /api/categories/:category_id` - Rename category (ADMIN)
/// - `GET /api/books` - List books visible to the caller
/// - `POST /api/books` - Create book
/// - `PUT /api/books/:book_id` - Update book
/// - `DELETE /api/books/:book_id` - Soft-delete book
/// - `GET /api/books/totals` - Dashboard totals (ADMIN)
pub fn create_router<R, V>(state: GatewayState<R, V>) -> Router
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Session
        .route("/api/login", post(session::login::<R, V>))
        .route("/api/logout", post(session::logout))
        .route("/api/whoami", get(session::whoami::<R, V>))
        // Users
        .route(
            "/api/users",
            get(users::list_users::<R, V>).post(users::create_user::<R, V>),
        )
        .route("/api/users/:user_id", put(users::update_user::<R, V>))
        // Categories
        .route(
            "/api/categories",
            get(categories::list_categories::<R, V>).post(categories::create_category::<R, V>),
        )
        .route(
            "/api/categories/:category_id",
            put(categories::update_category::<R, V>),
        )
        // Books
        .route(
            "/api/books",
            get(books::list_books::<R, V>).post(books::create_book::<R, V>),
        )
        .route("/api/books/totals", get(books::book_totals::<R, V>))
        .route(
            "/api/books/:book_id",
            put(books::update_book::<R, V>).delete(books::delete_book::<R, V>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
