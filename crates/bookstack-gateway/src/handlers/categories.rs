//! Category endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use bookstack_auth::IdentityVerifier;
use bookstack_control::Records;
use bookstack_core::CategoryId;

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::GatewayState;

/// Request body for creating or renaming a category.
#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    /// Category name.
    pub name: String,
}

/// List all categories. Open to any authenticated caller.
///
/// # Errors
///
/// Returns `401` without a valid session.
pub async fn list_categories<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    let categories = state.records.list_categories(user.identity()).await?;
    Ok(Json(Envelope::new(categories)))
}

/// Create a category. ADMIN only.
///
/// # Errors
///
/// Returns `403` for non-admin callers.
pub async fn create_category<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
    Json(body): Json<CategoryBody>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    if body.name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".into()));
    }

    let category = state
        .records
        .create_category(user.identity(), &body.name)
        .await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(category))))
}

/// Rename a category. ADMIN only.
///
/// # Errors
///
/// Returns `404` for an unknown category.
pub async fn update_category<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
    Path(category_id): Path<CategoryId>,
    Json(body): Json<CategoryBody>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    if body.name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".into()));
    }

    let category = state
        .records
        .update_category(user.identity(), &category_id, &body.name)
        .await?;
    Ok(Json(Envelope::new(category)))
}
