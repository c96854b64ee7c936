//! Input validation helpers shared by the per-entity input structs.

use crate::error::AppError;

/// Minimum password length accepted by the server.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate that a required text field is not blank.
pub fn validate_required(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input_field(
            format!("{field} is required"),
            field,
        ));
    }
    Ok(())
}

/// Validate an optional text field: if present it must not be blank.
pub fn validate_optional(value: Option<&str>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) => validate_required(v, field),
        None => Ok(()),
    }
}

/// Validate an email address shape (`local@domain.tld`).
pub fn validate_email(email: &str, field: &str) -> Result<(), AppError> {
    validate_required(email, field)?;

    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(AppError::invalid_input_field(
            format!("Invalid email '{email}'"),
            field,
        ));
    }
    Ok(())
}

/// Validate a password against the minimum length.
pub fn validate_password(password: &str, field: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::invalid_input_field(
            format!("{field} must be at least {MIN_PASSWORD_LEN} characters"),
            field,
        ));
    }
    Ok(())
}

/// Validate that a URL, when present, is absolute http(s) or a server-relative path.
pub fn validate_url(value: Option<&str>, field: &str) -> Result<(), AppError> {
    let Some(url) = value else {
        return Ok(());
    };

    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/') {
        Ok(())
    } else {
        Err(AppError::invalid_input_field(
            format!("{field} must be an http(s) URL, got '{url}'"),
            field,
        ))
    }
}
