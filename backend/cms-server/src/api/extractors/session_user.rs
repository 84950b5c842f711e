//! Axum extractor for the cookie-session flow

use crate::{ApiError, AppState};

use cms_auth::{AuthError, Principal};

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;
use tower_sessions::Session;

/// Session key holding the access token issued at login
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Principal resolved from the token stored in the server-side session.
///
/// The token is re-validated on every request, so the session flow expires
/// exactly when the bearer flow would.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Principal);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let session = Session::from_request_parts(parts, state)
                .await
                .map_err(|(_, message)| ApiError::internal(message))?;

            let Some(token) = session.get::<String>(AUTH_TOKEN_KEY).await? else {
                log::warn!("Session authentication failed on {}: no token", parts.uri.path());
                return Err(AuthError::MissingSession {
                    location: ErrorLocation::from(Location::caller()),
                }
                .into());
            };

            match state.authenticator.authenticate(&token) {
                Ok(principal) => Ok(SessionUser(principal)),
                Err(e) => {
                    log::warn!("Session authentication failed on {}: {e}", parts.uri.path());
                    // Drop the dead token so the next request starts clean
                    session.remove::<String>(AUTH_TOKEN_KEY).await?;
                    Err(e.into())
                }
            }
        }
    }
}
