//! Authentication REST handlers (bearer flow)

use crate::{
    ApiError, ApiResult, AppState, BearerUser, ChangePasswordRequest, ForgotPasswordRequest,
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ResetPasswordRequest,
};

use cms_core::UserProfile;

use axum::{Json, extract::State, http::StatusCode};

/// Answer for every forgot-password request, known email or not
pub const RESET_REQUESTED_MESSAGE: &str =
    "If an account exists for that email, password reset instructions have been sent";

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if req.identifier.trim().is_empty() {
        return Err(ApiError::validation("identifier", "Username or email is required"));
    }
    if req.password.is_empty() {
        return Err(ApiError::validation("password", "Password is required"));
    }

    let outcome = state
        .authenticator
        .login(&req.identifier, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        token: outcome.token.token,
        expires_at: outcome.token.expires_at,
        user: outcome.user,
    }))
}

/// POST /api/v1/auth/register
///
/// Creates an active Author account. Does not log the user in.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let profile = state.authenticator.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok(format!(
            "Account '{}' created, please sign in",
            profile.username
        ))),
    ))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    BearerUser(principal): BearerUser,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.authenticator.current_user(&principal).await?))
}

/// POST /api/v1/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    BearerUser(principal): BearerUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .authenticator
        .change_password(principal.user_id, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse::ok("Password changed")))
}

/// POST /api/v1/auth/forgot-password
///
/// Never reveals whether the email is registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(ticket) = state.authenticator.forgot_password(&req.email).await? {
        // No mail transport; the ticket only reaches the debug log
        log::debug!(
            "Password reset ticket for {} (expires {}): {}",
            ticket.email,
            ticket.expires_at,
            ticket.token
        );
    }

    Ok(Json(MessageResponse::ok(RESET_REQUESTED_MESSAGE)))
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .authenticator
        .reset_password(&req.email, &req.token, &req.new_password)
        .await?;

    Ok(Json(MessageResponse::ok("Password has been reset, please sign in")))
}
