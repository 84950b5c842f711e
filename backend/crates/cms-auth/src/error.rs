use cms_core::{CoreError, StoreError};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use uuid::Uuid;

/// User-facing text for a failed login. Identical for unknown identifiers and
/// wrong passwords.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username/email or password";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials for identifier '{identifier}' {location}")]
    InvalidCredentials {
        identifier: String,
        location: ErrorLocation,
    },

    #[error("Account {user_id} is deactivated {location}")]
    AccountDeactivated {
        user_id: Uuid,
        location: ErrorLocation,
    },

    #[error("Username '{username}' is already taken {location}")]
    DuplicateUsername {
        username: String,
        location: ErrorLocation,
    },

    #[error("Email '{email}' is already registered {location}")]
    DuplicateEmail {
        email: String,
        location: ErrorLocation,
    },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Not signed in {location}")]
    MissingSession { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    #[error("User {id} not found {location}")]
    UserNotFound { id: Uuid, location: ErrorLocation },

    #[error("Invalid or expired password reset token {location}")]
    InvalidResetToken { location: ErrorLocation },

    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} attempts per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Credential store unavailable: {message} {location}")]
    StoreUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("JWT signing failed: {source} {location}")]
    TokenSigning {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },

    #[error("Auth configuration error: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code returned to clients
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::AccountDeactivated { .. } => "ACCOUNT_DEACTIVATED",
            Self::DuplicateUsername { .. } => "DUPLICATE_USERNAME",
            Self::DuplicateEmail { .. } => "DUPLICATE_EMAIL",
            Self::InvalidToken { .. }
            | Self::TokenExpired { .. }
            | Self::MissingHeader { .. }
            | Self::InvalidScheme { .. }
            | Self::MissingSession { .. }
            | Self::JwtDecode { .. }
            | Self::InvalidClaim { .. } => "UNAUTHENTICATED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::UserNotFound { .. } => "NOT_FOUND",
            Self::InvalidResetToken { .. } => "INVALID_RESET_TOKEN",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::StoreUnavailable { .. }
            | Self::TokenSigning { .. }
            | Self::PasswordHash { .. }
            | Self::Configuration { .. } => "INTERNAL_ERROR",
        }
    }

    /// No usable identity was presented (missing, malformed or expired token)
    pub fn is_unauthenticated(&self) -> bool {
        self.error_code() == "UNAUTHENTICATED"
    }

    /// Server-side fault; details must not reach the client
    pub fn is_internal(&self) -> bool {
        self.error_code() == "INTERNAL_ERROR"
    }

    /// Message safe to show to the end user
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials { .. } => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::AccountDeactivated { .. } => {
                "This account has been deactivated. Contact an administrator.".to_string()
            }
            Self::DuplicateUsername { .. } => "Username is already taken".to_string(),
            Self::DuplicateEmail { .. } => "Email is already registered".to_string(),
            Self::TokenExpired { .. } => "Session expired, please sign in again".to_string(),
            Self::Forbidden { .. } => "You do not have permission to do that".to_string(),
            Self::UserNotFound { .. } => "User not found".to_string(),
            Self::InvalidResetToken { .. } => {
                "Invalid or expired password reset token".to_string()
            }
            Self::Validation { message, .. } => message.clone(),
            Self::RateLimitExceeded { .. } => {
                "Too many attempts, please try again later".to_string()
            }
            e if e.is_unauthenticated() => "Authentication required".to_string(),
            _ => "An internal error occurred".to_string(),
        }
    }

    pub fn field(&self) -> Option<String> {
        match self {
            Self::InvalidClaim { claim, .. } => Some(claim.clone()),
            Self::Validation { field, .. } => field.clone(),
            Self::DuplicateUsername { .. } => Some("username".to_string()),
            Self::DuplicateEmail { .. } => Some("email".to_string()),
            _ => None,
        }
    }

    #[track_caller]
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(field: &str, message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for AuthError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation {
                message,
                field,
                location,
            } => Self::Validation {
                message,
                field,
                location,
            },
            CoreError::InvalidRole { value, .. } => Self::Validation {
                message: format!("Unknown role '{value}'"),
                field: Some("role".to_string()),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Conflicts are mapped by the caller, which knows the offending value
impl From<StoreError> for AuthError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id, location } => Self::UserNotFound { id, location },
            other => Self::StoreUnavailable {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
