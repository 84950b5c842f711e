//! Single-use password reset tickets.
//!
//! A ticket is a short-lived JWT whose HMAC key is the token signing secret
//! concatenated with the user's current password hash. Changing the password
//! therefore invalidates every outstanding ticket without any server-side
//! bookkeeping, and a ticket for one user cannot be replayed against another.

use crate::{AuthError, Result as AuthErrorResult, SigningKey};

use cms_core::User;

use std::panic::Location;
use std::time::Duration;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESET_TTL: Duration = Duration::from_secs(30 * 60);
const RESET_PURPOSE: &str = "password_reset";

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    sub: String,
    purpose: String,
    iat: i64,
    exp: i64,
}

/// Reset ticket to be delivered to the account owner out of band
#[derive(Debug, Clone)]
pub struct PasswordResetTicket {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ResetTicketIssuer {
    signing_key: SigningKey,
    ttl: Duration,
}

impl ResetTicketIssuer {
    pub fn new(signing_key: SigningKey, ttl: Duration) -> Self {
        Self { signing_key, ttl }
    }

    fn key_material(&self, user: &User) -> Vec<u8> {
        let mut key = self.signing_key.secret().to_vec();
        key.extend_from_slice(user.password_hash.as_bytes());
        key
    }

    #[track_caller]
    pub fn issue(&self, user: &User) -> AuthErrorResult<PasswordResetTicket> {
        let iat = Utc::now().timestamp();
        let exp = iat.saturating_add(i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX));
        let claims = ResetClaims {
            sub: user.id.to_string(),
            purpose: RESET_PURPOSE.to_string(),
            iat,
            exp,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.key_material(user)),
        )
        .map_err(|e| AuthError::TokenSigning {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(PasswordResetTicket {
            user_id: user.id,
            email: user.email.clone(),
            token,
            expires_at: DateTime::from_timestamp(exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC),
        })
    }

    /// Accept `token` only if it was issued for `user`'s current password
    #[track_caller]
    pub fn verify(&self, user: &User, token: &str) -> AuthErrorResult<()> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let invalid = || AuthError::InvalidResetToken {
            location: ErrorLocation::from(Location::caller()),
        };

        let data = decode::<ResetClaims>(
            token,
            &DecodingKey::from_secret(&self.key_material(user)),
            &validation,
        )
        .map_err(|e| {
            log::debug!("Reset token rejected for user {}: {e}", user.id);
            invalid()
        })?;

        if data.claims.purpose != RESET_PURPOSE || data.claims.sub != user.id.to_string() {
            return Err(invalid());
        }

        Ok(())
    }
}
