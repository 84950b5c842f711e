use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_COOKIE_NAME: &str = "cms_session";
pub const DEFAULT_INACTIVITY_MINUTES: i64 = 60;
pub const MAX_INACTIVITY_MINUTES: i64 = 7 * 24 * 60;

/// Cookie session used by the server-rendered account pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Session is dropped after this long without a request
    pub inactivity_minutes: i64,
    /// Send the cookie over HTTPS only
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from(DEFAULT_COOKIE_NAME),
            inactivity_minutes: DEFAULT_INACTIVITY_MINUTES,
            secure: false,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let name = self.cookie_name.trim();
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::session(format!(
                "session.cookie_name must be non-empty and contain only [A-Za-z0-9_-], got '{}'",
                self.cookie_name
            )));
        }

        if self.inactivity_minutes < 1 || self.inactivity_minutes > MAX_INACTIVITY_MINUTES {
            return Err(ConfigError::session(format!(
                "session.inactivity_minutes must be 1-{}, got {}",
                MAX_INACTIVITY_MINUTES, self.inactivity_minutes
            )));
        }

        Ok(())
    }
}
