use crate::ApiError;

use cms_auth::AuthError;
use cms_core::UniqueField;

use std::panic::Location;

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http_body_util::BodyExt;
use uuid::Uuid;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_invalid_credentials_maps_to_401_with_generic_message() {
    let error: ApiError = AuthError::InvalidCredentials {
        identifier: "alice".into(),
        location: here(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(
        json["error"]["message"],
        cms_auth::error::INVALID_CREDENTIALS_MESSAGE
    );
    assert!(!json.to_string().contains("alice"));
}

#[tokio::test]
async fn test_unauthorized_response_carries_www_authenticate() {
    let error: ApiError = AuthError::TokenExpired { location: here() }.into();

    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_missing_header_maps_to_unauthenticated_code() {
    let error: ApiError = AuthError::MissingHeader { location: here() }.into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_deactivated_account_maps_to_403_with_distinct_code() {
    let error: ApiError = AuthError::AccountDeactivated {
        user_id: Uuid::new_v4(),
        location: here(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "ACCOUNT_DEACTIVATED");
}

#[tokio::test]
async fn test_forbidden_maps_to_403() {
    let error: ApiError = AuthError::forbidden("nope").into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_duplicate_email_maps_to_409_with_field() {
    let error: ApiError = AuthError::DuplicateEmail {
        email: "alice@x.com".into(),
        location: here(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "DUPLICATE_EMAIL");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error: ApiError = AuthError::validation("password", "Password too short").into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "password");
    assert_eq!(json["error"]["message"], "Password too short");
}

#[tokio::test]
async fn test_rate_limit_maps_to_429() {
    let error: ApiError = AuthError::RateLimitExceeded {
        limit: 5,
        window_secs: 60,
        location: here(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["error"]["code"], "RATE_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_store_failure_is_opaque_500() {
    let error: ApiError = AuthError::StoreUnavailable {
        message: "disk I/O error at /var/lib/cms.db".into(),
        location: here(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("/var/lib"));
}

#[tokio::test]
async fn test_db_not_found_maps_to_404() {
    let error: ApiError = cms_db::DbError::NotFound {
        id: Uuid::new_v4(),
        location: here(),
    }
    .into();

    let (status, _) = body_json(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_db_unique_violation_is_internal_when_it_escapes_auth() {
    let error: ApiError = cms_db::DbError::UniqueViolation {
        field: UniqueField::Username,
        location: here(),
    }
    .into();

    let (status, _) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_uuid_error_converts_to_validation() {
    let uuid_err = Uuid::parse_str("not-a-uuid").unwrap_err();
    let api_err: ApiError = uuid_err.into();

    match api_err {
        ApiError::Validation { message, field, .. } => {
            assert!(message.contains("Invalid UUID"));
            assert_eq!(field.as_deref(), Some("id"));
        }
        _ => panic!("Expected Validation error"),
    }
}
