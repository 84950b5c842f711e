//! User management REST handlers
//!
//! Authorization lives in `AccountService`; handlers only resolve the
//! caller and parse input.

use crate::{
    ApiResult, AppState, BearerUser, SetActiveRequest, UpdateProfileRequest, UserListResponse,
};

use cms_core::UserProfile;

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// GET /api/v1/users (Admin)
pub async fn list_users(
    State(state): State<AppState>,
    BearerUser(principal): BearerUser,
) -> ApiResult<Json<UserListResponse>> {
    let users = state.accounts.list(&principal).await?;

    Ok(Json(UserListResponse { users }))
}

/// GET /api/v1/users/{id} (owner or Admin)
pub async fn get_user(
    State(state): State<AppState>,
    BearerUser(principal): BearerUser,
    Path(id): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    let user_id = Uuid::parse_str(&id)?;

    Ok(Json(state.accounts.get(&principal, user_id).await?))
}

/// PUT /api/v1/users/{id}/profile (owner or Admin)
pub async fn update_user_profile(
    State(state): State<AppState>,
    BearerUser(principal): BearerUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserProfile>> {
    let user_id = Uuid::parse_str(&id)?;

    let profile = state
        .accounts
        .update_profile(&principal, user_id, req.into())
        .await?;

    Ok(Json(profile))
}

/// PUT /api/v1/users/{id}/active (Admin)
pub async fn set_user_active(
    State(state): State<AppState>,
    BearerUser(principal): BearerUser,
    Path(id): Path<String>,
    Json(req): Json<SetActiveRequest>,
) -> ApiResult<Json<UserProfile>> {
    let user_id = Uuid::parse_str(&id)?;

    let profile = state
        .accounts
        .set_active(&principal, user_id, req.is_active)
        .await?;

    Ok(Json(profile))
}
