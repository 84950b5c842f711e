//! Axum extractor for the bearer-token flow

use crate::{ApiError, AppState};

use cms_auth::Principal;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Principal resolved from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is missing, uses another scheme, or
/// carries an invalid or expired token.
#[derive(Debug, Clone)]
pub struct BearerUser(pub Principal);

impl FromRequestParts<AppState> for BearerUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            match state.authenticator.authenticate_bearer(header) {
                Ok(principal) => {
                    log::debug!("Bearer principal resolved: {}", principal.user_id);
                    Ok(BearerUser(principal))
                }
                Err(e) => {
                    log::warn!("Bearer authentication failed on {}: {e}", parts.uri.path());
                    Err(e.into())
                }
            }
        }
    }
}
