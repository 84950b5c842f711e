use crate::api::{auth::auth, users::users};
use crate::{AppState, health, web::account};

use cms_config::SessionConfig;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState, session: &SessionConfig) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(session.cookie_name.clone())
        .with_secure(session.secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            session.inactivity_minutes,
        )));

    // Bearer-token API
    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        .route("/auth/change-password", post(auth::change_password))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}/profile", put(users::update_user_profile))
        .route("/users/{id}/active", put(users::set_user_active))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Server-rendered app, cookie session
    let web = Router::new()
        .route("/account/login", post(account::login))
        .route("/account/register", post(account::register))
        .route("/account/logout", post(account::logout))
        .route("/account/profile", get(account::profile))
        .route("/admin/users", get(account::admin_users))
        .layer(session_layer);

    Router::new()
        .nest("/api/v1", api)
        .merge(web)
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
}
