use error_location::ErrorLocation;

use std::fmt;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;

/// Column protected by a UNIQUE constraint in the credential store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => write!(f, "username"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// Failures surfaced by a [`crate::CredentialStore`] implementation
#[derive(Error, Debug)]
pub enum StoreError {
    /// A write lost the race on a unique column
    #[error("Unique constraint violated on {field} {location}")]
    Conflict {
        field: UniqueField,
        location: ErrorLocation,
    },

    /// The row to update does not exist
    #[error("User {id} not found {location}")]
    NotFound {
        id: uuid::Uuid,
        location: ErrorLocation,
    },

    #[error("Credential store unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

pub type StoreResult<T> = StdResult<T, StoreError>;
