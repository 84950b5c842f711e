use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// HS256 secrets shorter than this are rejected
pub const MIN_SECRET_LENGTH: usize = 32;

/// Local-development fallback. Anything signed with it is trivially forgeable,
/// so it is only used when explicitly allowed and is loudly named.
pub const DEVELOPMENT_SECRET: &str = "INSECURE-DEVELOPMENT-ONLY-JWT-SECRET-DO-NOT-DEPLOY";

/// Symmetric key used to sign and verify access tokens
#[derive(Clone)]
pub enum SigningKey {
    /// Secret supplied through configuration or environment
    Configured(Vec<u8>),
    /// Built-in fallback for local development
    Development,
}

impl SigningKey {
    /// Resolve the key from an optional configured secret.
    ///
    /// Without a secret the development fallback is used only when
    /// `allow_development` is set.
    #[track_caller]
    pub fn resolve(secret: Option<&str>, allow_development: bool) -> AuthErrorResult<Self> {
        match secret {
            Some(s) if s.len() >= MIN_SECRET_LENGTH => Ok(Self::Configured(s.as_bytes().to_vec())),
            Some(_) => Err(AuthError::Configuration {
                message: format!("JWT secret must be at least {MIN_SECRET_LENGTH} characters"),
                location: ErrorLocation::from(Location::caller()),
            }),
            None if allow_development => {
                log::warn!("No JWT secret configured: signing with the DEVELOPMENT key");
                Ok(Self::Development)
            }
            None => Err(AuthError::Configuration {
                message: "JWT secret is required (set auth.jwt_secret or CMS_AUTH_JWT_SECRET)"
                    .to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    pub fn secret(&self) -> &[u8] {
        match self {
            Self::Configured(secret) => secret,
            Self::Development => DEVELOPMENT_SECRET.as_bytes(),
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured(_) => write!(f, "SigningKey::Configured(<redacted>)"),
            Self::Development => write!(f, "SigningKey::Development"),
        }
    }
}
