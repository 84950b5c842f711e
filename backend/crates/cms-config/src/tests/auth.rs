use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, setup_valid_env};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Auth
// =========================================================================

#[test]
#[serial]
fn given_no_secret_and_no_dev_fallback_when_validate_then_error_mentions_jwt_secret() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::remove("CMS_AUTH_JWT_SECRET");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("jwt_secret"));
}

#[test]
#[serial]
fn given_no_secret_but_dev_fallback_allowed_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::remove("CMS_AUTH_JWT_SECRET");
    let _dev = EnvGuard::set("CMS_AUTH_ALLOW_DEV_SECRET", "true");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_jwt_secret_too_short_when_validate_then_error_mentions_32_chars() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("CMS_AUTH_JWT_SECRET", "tooshort");
    let _dev = EnvGuard::set("CMS_AUTH_ALLOW_DEV_SECRET", "true");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("32 characters"));
}

#[test]
#[serial]
fn given_jwt_secret_exactly_32_chars_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("CMS_AUTH_JWT_SECRET", "12345678901234567890123456789012"); // 32 chars

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_empty_secret_env_var_when_load_then_treated_as_unset() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("CMS_AUTH_JWT_SECRET", "");

    // When
    let config = Config::load().unwrap();

    // Then
    assert!(config.auth.jwt_secret.is_none());
}

#[test]
#[serial]
fn given_zero_token_expiry_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_env();
    let _expiry = EnvGuard::set("CMS_AUTH_TOKEN_EXPIRY_SECS", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("token_expiry_secs"));
}

#[test]
#[serial]
fn given_excessive_leeway_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_env();
    let _leeway = EnvGuard::set("CMS_AUTH_LEEWAY_SECS", "3600");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("leeway_secs"));
}

#[test]
#[serial]
fn given_blank_issuer_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_env();
    let _issuer = EnvGuard::set("CMS_AUTH_ISSUER", "  ");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}
