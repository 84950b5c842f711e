use thiserror::Error;

/// Startup and shutdown failures of the binary
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] cms_config::ConfigError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] cms_auth::AuthError),

    #[error("Database error: {0}")]
    Database(#[from] cms_db::DbError),

    #[error("Database connection error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
