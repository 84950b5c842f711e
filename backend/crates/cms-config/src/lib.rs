mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod password_config;
mod rate_limit_config;
mod server_config;
mod session_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use password_config::PasswordConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;
pub use session_config::SessionConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "cms.db";

const DEFAULT_TOKEN_EXPIRY_SECS: u64 = 3600;
const MAX_TOKEN_EXPIRY_SECS: u64 = 30 * 24 * 3600;
const DEFAULT_LEEWAY_SECS: u64 = 0;
const MAX_LEEWAY_SECS: u64 = 300;
const DEFAULT_ISSUER: &str = "cms";
const MIN_JWT_SECRET_LENGTH: usize = 32;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;
