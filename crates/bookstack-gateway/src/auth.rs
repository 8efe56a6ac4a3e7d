//! Authentication extractor.
//!
//! This module provides the `SessionUser` extractor that reads the
//! `TOKEN` cookie and resolves it to a stored identity.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bookstack_auth::{Identity, IdentityVerifier};
use bookstack_control::Records;

use crate::cookie;
use crate::error::ApiError;
use crate::state::GatewayState;

/// An authenticated caller extracted from the session cookie.
///
/// Token values that are missing, malformed, or no longer backed by a
/// stored user all reject with `401 Unauthorized`, so a stale cookie
/// collapses to the unauthenticated case.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Identity);

impl SessionUser {
    /// The resolved identity.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl<R, V> FromRequestParts<Arc<GatewayState<R, V>>> for SessionUser
where
    R: Records + 'static,
    V: IdentityVerifier + 'static,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<GatewayState<R, V>>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token =
                cookie::token_from_headers(&parts.headers).ok_or(ApiError::Unauthorized)?;

            let identity = state.verifier.verify(&token).await?;

            Ok(SessionUser(identity))
        })
    }
}
