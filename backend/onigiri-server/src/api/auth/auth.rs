//! Authentication REST API handlers

use crate::{
    ApiResult, AppState, CurrentUser, LoginRequest, SessionResponse, SignUpRequest, UserResponse,
};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// POST /api/auth/sign-up
///
/// Register with email and password. No token is issued; log in afterwards.
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let Json(request) = payload?;

    let user = state.auth.sign_up(request.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user: user.into() })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<SessionResponse>> {
    let Json(request) = payload?;

    let session = state.auth.login(request.into()).await?;

    Ok(Json(session.into()))
}

/// GET /api/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> ApiResult<Json<UserResponse>> {
    Ok(Json(UserResponse { user: user.into() }))
}
