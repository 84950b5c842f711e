use crate::{AuthError, Claims, Result as AuthErrorResult, TokenConfig};

use cms_core::User;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

/// A freshly signed access token
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs HS256 access tokens
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    header: Header,
    expiry_secs: i64,
    issuer: String,
}

impl JwtIssuer {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.signing_key.secret()),
            header: Header::new(Algorithm::HS256),
            expiry_secs: i64::try_from(config.expiry.as_secs()).unwrap_or(i64::MAX),
            issuer: config.issuer.clone(),
        }
    }

    /// Sign a token asserting `user`'s identity and role
    #[track_caller]
    pub fn issue(&self, user: &User) -> AuthErrorResult<IssuedToken> {
        let iat = Utc::now().timestamp();
        let exp = iat.saturating_add(self.expiry_secs);
        let claims = Claims::for_user(user, &self.issuer, iat, exp);

        let token = encode(&self.header, &claims, &self.encoding_key).map_err(|e| {
            AuthError::TokenSigning {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let expires_at =
            DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Configuration {
                message: "Token expiry is out of range".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(IssuedToken { token, expires_at })
    }
}
