use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Rate limit constraints
pub const MIN_LOGIN_ATTEMPTS: u32 = 1;
pub const MAX_LOGIN_ATTEMPTS: u32 = 1000;
pub const DEFAULT_LOGIN_ATTEMPTS: u32 = 10;

pub const MIN_LOGIN_WINDOW_SECS: u64 = 1;
pub const MAX_LOGIN_WINDOW_SECS: u64 = 3600;
pub const DEFAULT_LOGIN_WINDOW_SECS: u64 = 60;

/// Login throttling, keyed by the submitted identifier
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Set to false to disable throttling entirely
    pub enabled: bool,
    /// Maximum login attempts per identifier per window
    pub login_max_attempts: u32,
    /// Window duration in seconds
    pub login_window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            login_max_attempts: DEFAULT_LOGIN_ATTEMPTS,
            login_window_secs: DEFAULT_LOGIN_WINDOW_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.login_max_attempts < MIN_LOGIN_ATTEMPTS
            || self.login_max_attempts > MAX_LOGIN_ATTEMPTS
        {
            return Err(ConfigError::config(format!(
                "rate_limit.login_max_attempts must be {}-{}, got {}",
                MIN_LOGIN_ATTEMPTS, MAX_LOGIN_ATTEMPTS, self.login_max_attempts
            )));
        }

        if self.login_window_secs < MIN_LOGIN_WINDOW_SECS
            || self.login_window_secs > MAX_LOGIN_WINDOW_SECS
        {
            return Err(ConfigError::config(format!(
                "rate_limit.login_window_secs must be {}-{}, got {}",
                MIN_LOGIN_WINDOW_SECS, MAX_LOGIN_WINDOW_SECS, self.login_window_secs
            )));
        }

        Ok(())
    }
}
