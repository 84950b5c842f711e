use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LoggingConfig, PasswordConfig,
    RateLimitConfig, ServerConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

pub const CONFIG_DIR_ENV: &str = "CMS_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".cms";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub password: PasswordConfig,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for CMS_CONFIG_DIR env var, else use ./.cms/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply CMS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: CMS_CONFIG_DIR env var > ./.cms/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.password.validate()?;
        self.session.validate()?;
        self.rate_limit.validate()?;

        let db_path = Path::new(&self.database.path);
        if self.database.path.trim().is_empty()
            || db_path.is_absolute()
            || self.database.path.contains("..")
        {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path to the SQLite file
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Absolute path to the log file, if file logging is configured
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);

        let key_source = if self.auth.jwt_secret.is_some() {
            "configured secret"
        } else {
            "DEVELOPMENT key"
        };
        info!(
            "  auth: HS256 ({key_source}), expiry={}s, leeway={}s, issuer={}",
            self.auth.token_expiry_secs, self.auth.leeway_secs, self.auth.issuer
        );

        info!(
            "  password: argon2id m={}KiB t={} p={}, min_length={}",
            self.password.memory_kib,
            self.password.iterations,
            self.password.parallelism,
            self.password.min_length
        );

        info!(
            "  session: cookie={}, inactivity={}m, secure={}",
            self.session.cookie_name, self.session.inactivity_minutes, self.session.secure
        );

        if self.rate_limit.enabled {
            info!(
                "  rate_limit: {} logins/{}s per identifier",
                self.rate_limit.login_max_attempts, self.rate_limit.login_window_secs
            );
        } else {
            info!("  rate_limit: disabled");
        }

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("CMS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("CMS_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("CMS_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("CMS_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_parse(
            "CMS_AUTH_TOKEN_EXPIRY_SECS",
            &mut self.auth.token_expiry_secs,
        );
        Self::apply_env_parse("CMS_AUTH_LEEWAY_SECS", &mut self.auth.leeway_secs);
        Self::apply_env_string("CMS_AUTH_ISSUER", &mut self.auth.issuer);
        Self::apply_env_bool("CMS_AUTH_ALLOW_DEV_SECRET", &mut self.auth.allow_dev_secret);

        // Password
        Self::apply_env_parse("CMS_PASSWORD_MEMORY_KIB", &mut self.password.memory_kib);
        Self::apply_env_parse("CMS_PASSWORD_ITERATIONS", &mut self.password.iterations);
        Self::apply_env_parse("CMS_PASSWORD_PARALLELISM", &mut self.password.parallelism);
        Self::apply_env_parse("CMS_PASSWORD_MIN_LENGTH", &mut self.password.min_length);

        // Session
        Self::apply_env_string("CMS_SESSION_COOKIE_NAME", &mut self.session.cookie_name);
        Self::apply_env_parse(
            "CMS_SESSION_INACTIVITY_MINUTES",
            &mut self.session.inactivity_minutes,
        );
        Self::apply_env_bool("CMS_SESSION_SECURE", &mut self.session.secure);

        // Rate limit
        Self::apply_env_bool("CMS_RATE_LIMIT_ENABLED", &mut self.rate_limit.enabled);
        Self::apply_env_parse(
            "CMS_RATE_LIMIT_LOGIN_MAX_ATTEMPTS",
            &mut self.rate_limit.login_max_attempts,
        );
        Self::apply_env_parse(
            "CMS_RATE_LIMIT_LOGIN_WINDOW_SECS",
            &mut self.rate_limit.login_window_secs,
        );

        // Logging
        Self::apply_env_parse("CMS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("CMS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_string("CMS_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("CMS_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values leave the target untouched
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val).filter(|v| !v.is_empty());
        }
    }
}
