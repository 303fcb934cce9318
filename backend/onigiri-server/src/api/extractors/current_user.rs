//! Bearer-token authentication for REST handlers

use crate::{ApiError, AppState};

use onigiri_auth::AuthError;
use onigiri_core::UserIdentity;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

const BEARER_PREFIX: &str = "Bearer ";

/// The identity behind the request's `Authorization: Bearer <token>` header.
///
/// Rejects with 401 when the header is missing or malformed, the token fails
/// validation, or its subject no longer exists.
pub struct CurrentUser(pub UserIdentity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = bearer_token(parts)?;
            let user = state.auth.authenticate(token).await?;
            log::debug!("Authenticated request for user {}", user.id);
            Ok(CurrentUser(user))
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthError::token_invalid("missing Authorization header"))?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::token_invalid("Authorization header is not valid ASCII"))?;

    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::token_invalid("expected a Bearer token"))
}
