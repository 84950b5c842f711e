//! Cookie-session handlers for the server-rendered app.
//!
//! The access token lives only in the server-side session; the browser holds
//! the session cookie. Page rendering is out of scope, so successful reads
//! answer with JSON and failures use the same error body as the REST API.

use crate::api::extractors::session_user::AUTH_TOKEN_KEY;
use crate::web::login_form::LoginForm;
use crate::{ApiError, ApiResult, AppState, RegisterRequest, SessionUser, UserListResponse};

use cms_core::UserProfile;

use axum::{Form, Json, extract::State, response::Redirect};
use tower_sessions::Session;

pub const LOGIN_PAGE: &str = "/account/login";
pub const PROFILE_PAGE: &str = "/account/profile";

/// POST /account/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> ApiResult<Redirect> {
    if form.identifier.trim().is_empty() {
        return Err(ApiError::validation("identifier", "Username or email is required"));
    }

    let outcome = state
        .authenticator
        .login(&form.identifier, &form.password)
        .await?;

    // New session id on privilege change
    session.cycle_id().await?;
    session.insert(AUTH_TOKEN_KEY, &outcome.token.token).await?;
    log::info!("Session established for user {}", outcome.user.id);

    Ok(Redirect::to(PROFILE_PAGE))
}

/// POST /account/register
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterRequest>,
) -> ApiResult<Redirect> {
    state.authenticator.register(form.into()).await?;

    Ok(Redirect::to(LOGIN_PAGE))
}

/// POST /account/logout
pub async fn logout(session: Session) -> ApiResult<Redirect> {
    session.flush().await?;

    Ok(Redirect::to(LOGIN_PAGE))
}

/// GET /account/profile
pub async fn profile(
    State(state): State<AppState>,
    SessionUser(principal): SessionUser,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.authenticator.current_user(&principal).await?))
}

/// GET /admin/users (Admin)
pub async fn admin_users(
    State(state): State<AppState>,
    SessionUser(principal): SessionUser,
) -> ApiResult<Json<UserListResponse>> {
    let users = state.accounts.list(&principal).await?;

    Ok(Json(UserListResponse { users }))
}
