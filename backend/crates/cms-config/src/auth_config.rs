use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ISSUER, DEFAULT_LEEWAY_SECS,
    DEFAULT_TOKEN_EXPIRY_SECS, MAX_LEEWAY_SECS, MAX_TOKEN_EXPIRY_SECS, MIN_JWT_SECRET_LENGTH,
};

use serde::Deserialize;

/// Token signing and lifetime settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret; required unless `allow_dev_secret` is set
    pub jwt_secret: Option<String>,
    pub token_expiry_secs: u64,
    /// Clock skew tolerated when checking `exp`
    pub leeway_secs: u64,
    pub issuer: String,
    /// Fall back to the built-in development key when no secret is configured
    pub allow_dev_secret: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_expiry_secs: DEFAULT_TOKEN_EXPIRY_SECS,
            leeway_secs: DEFAULT_LEEWAY_SECS,
            issuer: String::from(DEFAULT_ISSUER),
            allow_dev_secret: false,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.jwt_secret {
            Some(secret) if secret.len() < MIN_JWT_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {MIN_JWT_SECRET_LENGTH} characters"
                )));
            }
            None if !self.allow_dev_secret => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (or set auth.allow_dev_secret for local development)",
                ));
            }
            _ => {}
        }

        if self.token_expiry_secs == 0 || self.token_expiry_secs > MAX_TOKEN_EXPIRY_SECS {
            return Err(ConfigError::auth(format!(
                "auth.token_expiry_secs must be 1-{}, got {}",
                MAX_TOKEN_EXPIRY_SECS, self.token_expiry_secs
            )));
        }

        if self.leeway_secs > MAX_LEEWAY_SECS {
            return Err(ConfigError::auth(format!(
                "auth.leeway_secs must be at most {}, got {}",
                MAX_LEEWAY_SECS, self.leeway_secs
            )));
        }

        if self.issuer.trim().is_empty() {
            return Err(ConfigError::auth("auth.issuer cannot be empty"));
        }

        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("issuer", &self.issuer)
            .field("allow_dev_secret", &self.allow_dev_secret)
            .finish()
    }
}
