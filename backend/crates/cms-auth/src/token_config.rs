use crate::SigningKey;

use std::time::Duration;

pub const DEFAULT_TOKEN_EXPIRY: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_ISSUER: &str = "cms";

/// Access token parameters shared by issuer and validator
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub signing_key: SigningKey,
    /// Lifetime of an issued token
    pub expiry: Duration,
    /// Clock skew tolerated when checking `exp`
    pub leeway: Duration,
    pub issuer: String,
}

impl TokenConfig {
    pub fn new(signing_key: SigningKey) -> Self {
        Self {
            signing_key,
            expiry: DEFAULT_TOKEN_EXPIRY,
            leeway: Duration::ZERO,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn with_issuer<S: Into<String>>(mut self, issuer: S) -> Self {
        self.issuer = issuer.into();
        self
    }
}
