//! REST API error types
//!
//! Every failure leaves the server as `{"error": {"code", "message", "field?"}}`
//! with a status derived from the auth error taxonomy. Internal faults carry
//! an opaque message; details go to the log only.

use cms_auth::AuthError;
use cms_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "UNAUTHENTICATED", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// No identity, or credentials rejected (401)
    #[error("Unauthorized [{code}]: {message} {location}")]
    Unauthorized {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Identity known but not permitted (403)
    #[error("Forbidden [{code}]: {message} {location}")]
    Forbidden {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Uniqueness conflict (409)
    #[error("Conflict [{code}]: {message} {location}")]
    Conflict {
        code: &'static str,
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Bad request with a specific code (400)
    #[error("Bad request [{code}]: {message} {location}")]
    BadRequest {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Throttled (429)
    #[error("Too many requests: {message} {location}")]
    TooManyRequests {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        ApiError::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(field: &str, message: S) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("{self}");
        }

        let body = match self {
            ApiError::Unauthorized { code, message, .. }
            | ApiError::Forbidden { code, message, .. }
            | ApiError::BadRequest { code, message, .. } => ApiErrorBody {
                code: code.into(),
                message,
                field: None,
            },
            ApiError::NotFound { message, .. } => ApiErrorBody {
                code: "NOT_FOUND".into(),
                message,
                field: None,
            },
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::Conflict {
                code,
                message,
                field,
                ..
            } => ApiErrorBody {
                code: code.into(),
                message,
                field,
            },
            ApiError::TooManyRequests { message, .. } => ApiErrorBody {
                code: "RATE_LIMIT_EXCEEDED".into(),
                message,
                field: None,
            },
            ApiError::Internal { .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message: INTERNAL_ERROR_MESSAGE.into(),
                field: None,
            },
        };

        let mut response = (status, Json(ApiErrorResponse { error: body })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

/// Map the auth taxonomy onto HTTP
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let code = e.error_code();
        let message = e.user_message();

        match e {
            AuthError::InvalidCredentials { .. } => ApiError::Unauthorized {
                code,
                message,
                location,
            },
            ref unauth if unauth.is_unauthenticated() => ApiError::Unauthorized {
                code,
                message,
                location,
            },
            AuthError::AccountDeactivated { .. } | AuthError::Forbidden { .. } => {
                ApiError::Forbidden {
                    code,
                    message,
                    location,
                }
            }
            AuthError::DuplicateUsername { .. } | AuthError::DuplicateEmail { .. } => {
                ApiError::Conflict {
                    code,
                    field: e.field(),
                    message,
                    location,
                }
            }
            AuthError::UserNotFound { .. } => ApiError::NotFound { message, location },
            AuthError::Validation { field, .. } => ApiError::Validation {
                message,
                field,
                location,
            },
            AuthError::InvalidResetToken { .. } => ApiError::BadRequest {
                code,
                message,
                location,
            },
            AuthError::RateLimitExceeded { .. } => ApiError::TooManyRequests { message, location },
            other => {
                log::error!("Auth failure: {other}");
                ApiError::Internal {
                    message: other.to_string(),
                    location,
                }
            }
        }
    }
}

/// Convert UUID parse errors to API errors
impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::Validation {
            message: format!("Invalid UUID format: {e}"),
            field: Some("id".to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Database error: {e}");

        match e {
            DbError::NotFound { id, .. } => ApiError::NotFound {
                message: format!("User {id} not found"),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ApiError::Internal {
                message: "Database operation failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Session store failures are server faults
impl From<tower_sessions::session::Error> for ApiError {
    #[track_caller]
    fn from(e: tower_sessions::session::Error) -> Self {
        ApiError::Internal {
            message: format!("Session error: {e}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
