//! Book endpoints, including the dashboard totals.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use bookstack_auth::IdentityVerifier;
use bookstack_control::{CreateBookRequest, Records, UpdateBookRequest};
use bookstack_core::BookId;

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::GatewayState;

/// List active books visible to the caller.
///
/// ADMIN callers see every active book; USER callers see only books in
/// categories linked to their account. Soft-deleted books never appear.
///
/// # Errors
///
/// Returns `401` without a valid session.
pub async fn list_books<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    let books = state.records.list_books(user.identity()).await?;
    Ok(Json(Envelope::new(books)))
}

/// Create a book attributed to the caller.
///
/// # Errors
///
/// Returns `404` when the category does not exist.
pub async fn create_book<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
    Json(body): Json<CreateBookRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    if body.title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".into()));
    }

    let book = state.records.create_book(user.identity(), body).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(book))))
}

/// Update a book. Clears any soft-delete mark on the record.
///
/// # Errors
///
/// Returns `404` for an unknown book or category.
pub async fn update_book<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
    Path(book_id): Path<BookId>,
    Json(body): Json<UpdateBookRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    if body.title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".into()));
    }

    let book = state
        .records
        .update_book(user.identity(), &book_id, body)
        .await?;
    Ok(Json(Envelope::new(book)))
}

/// Soft-delete a book. The record is retained for the dashboard totals.
///
/// # Errors
///
/// Returns `404` for an unknown book.
pub async fn delete_book<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
    Path(book_id): Path<BookId>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    let book = state.records.delete_book(user.identity(), &book_id).await?;
    Ok(Json(Envelope::new(book)))
}

/// Aggregate book counts for the admin dashboard. ADMIN only.
///
/// # Errors
///
/// Returns `403` for non-admin callers.
pub async fn book_totals<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    let totals = state.records.dashboard_totals(user.identity()).await?;
    Ok(Json(Envelope::new(totals)))
}
