use cms_core::{StoreError, UniqueField};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Corrupt row: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unique constraint failed on {field} {location}")]
    UniqueViolation {
        field: UniqueField,
        location: ErrorLocation,
    },

    #[error("User not found: {id} {location}")]
    NotFound {
        id: uuid::Uuid,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if let sqlx::Error::Database(ref db_err) = source
            && db_err.is_unique_violation()
        {
            // SQLite reports "UNIQUE constraint failed: cms_users.<column>"
            let message = db_err.message();
            if message.contains("username") {
                return Self::UniqueViolation {
                    field: UniqueField::Username,
                    location,
                };
            }
            if message.contains("email") {
                return Self::UniqueViolation {
                    field: UniqueField::Email,
                    location,
                };
            }
        }

        Self::Sqlx { source, location }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    #[track_caller]
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for StoreError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation { field, location } => StoreError::Conflict { field, location },
            DbError::NotFound { id, location } => StoreError::NotFound { id, location },
            other => {
                log::error!("Credential store failure: {other}");
                StoreError::Unavailable {
                    message: other.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
