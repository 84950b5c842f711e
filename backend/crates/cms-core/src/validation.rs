//! Input rules shared by registration and password changes.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_NAME_LENGTH: usize = 100;

#[track_caller]
fn invalid(field: &str, message: impl Into<String>) -> CoreError {
    CoreError::Validation {
        message: message.into(),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
pub fn validate_username(username: &str) -> CoreErrorResult<()> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(invalid(
            "username",
            format!(
                "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
            ),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(invalid(
            "username",
            "Username may only contain letters, digits, '_', '.' and '-'",
        ));
    }
    Ok(())
}

/// Shape check only; deliverability is not our concern
#[track_caller]
pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(invalid("email", "Email is too long"));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(invalid("email", "Email address is not valid"));
    }
    Ok(())
}

#[track_caller]
pub fn validate_password(password: &str, min_length: usize) -> CoreErrorResult<()> {
    if password.chars().count() < min_length {
        return Err(invalid(
            "password",
            format!("Password must be at least {min_length} characters"),
        ));
    }
    Ok(())
}

#[track_caller]
pub fn validate_name(field: &str, value: Option<&str>) -> CoreErrorResult<()> {
    if let Some(v) = value
        && v.chars().count() > MAX_NAME_LENGTH
    {
        return Err(invalid(
            field,
            format!("{field} cannot exceed {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(())
}
