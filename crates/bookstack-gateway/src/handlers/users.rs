//! User administration endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use bookstack_auth::IdentityVerifier;
use bookstack_control::{CreateUserRequest, Records, UpdateUserRequest};
use bookstack_core::UserId;

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::GatewayState;

/// List all users with their category links. ADMIN only.
///
/// # Errors
///
/// Returns `403` for non-admin callers.
pub async fn list_users<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    let users = state.records.list_users(user.identity()).await?;
    Ok(Json(Envelope::new(users)))
}

/// Create a user account. ADMIN only.
///
/// # Errors
///
/// Returns `409` when the username is already taken.
pub async fn create_user<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
    Json(body): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    if body.username.is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".into()));
    }
    if body.password.is_empty() {
        return Err(ApiError::BadRequest("password must not be empty".into()));
    }

    let record = state.records.create_user(user.identity(), body).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(record))))
}

/// Update a user account and reconcile its category links. ADMIN only.
///
/// The `categoryIds` field is the complete desired link set; links not
/// listed are removed.
///
/// # Errors
///
/// Returns `404` for an unknown user or category, `409` on a username
/// conflict.
pub async fn update_user<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
    Path(user_id): Path<UserId>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    if body.username.is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".into()));
    }

    let record = state
        .records
        .update_user(user.identity(), &user_id, body)
        .await?;
    Ok(Json(Envelope::new(record)))
}
