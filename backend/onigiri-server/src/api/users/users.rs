//! User REST API handlers

use crate::{ApiResult, AppState, CurrentUser, UpdateUserRequest, UserResponse};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

/// PATCH /api/users/me
///
/// Change the caller's display name and/or email. Omitted fields are kept.
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(request) = payload?;

    let updated = state.auth.update_user(user.id, request.into()).await?;

    Ok(Json(UserResponse {
        user: updated.into(),
    }))
}
