//! Session endpoints: login, logout, and identity lookup.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use bookstack_auth::{IdentityVerifier, SessionToken};
use bookstack_control::Records;

use crate::auth::SessionUser;
use crate::cookie;
use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::GatewayState;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Check credentials and establish a session.
///
/// On success the response carries a `Set-Cookie` header placing the
/// caller's primary key in the `TOKEN` cookie, valid for one hour.
///
/// # Errors
///
/// Returns `403` with the message `No user found.` when the username is
/// unknown or the password does not match.
pub async fn login<R, V>(
    State(state): State<Arc<GatewayState<R, V>>>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    let record = state.records.login(&body.username, &body.password).await?;

    let token = SessionToken::for_user(record.user_id);
    let set_cookie = cookie::session_cookie(&token.to_string());

    tracing::info!(user_id = %record.user_id, "Session established");

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, set_cookie)],
        Json(Envelope::new(record)),
    ))
}

/// Clear the session cookie.
///
/// Always succeeds, even without an existing session.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(SET_COOKIE, cookie::clear_session_cookie())],
        Json(Envelope::new(())),
    )
}

/// Return the identity behind the caller's session cookie.
///
/// # Errors
///
/// Returns `401` when the cookie is missing, malformed, or no longer
/// matches a stored user.
pub async fn whoami<R, V>(
    State(_state): State<Arc<GatewayState<R, V>>>,
    user: SessionUser,
) -> Result<impl IntoResponse, ApiError>
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    Ok(Json(Envelope::new(user.0)))
}
