//! Input validation for user commands.

use regex::Regex;

use crate::types::{CreateUserCommand, UserServiceError};

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_EMAIL_LENGTH: usize = 255;

/// Validate a create command before anything touches the datastore.
pub fn validate_create(command: &CreateUserCommand) -> Result<(), UserServiceError> {
    if command.name.trim().is_empty() {
        return Err(UserServiceError::Validation(
            "name must not be empty".to_string(),
        ));
    }

    validate_email(&command.email)?;

    if command.password != command.password_confirm {
        return Err(UserServiceError::Validation(
            "passwords do not match".to_string(),
        ));
    }

    if command.password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserServiceError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), UserServiceError> {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map_err(|_| UserServiceError::Validation("invalid email regex".to_string()))?;

    if !email_regex.is_match(email) {
        return Err(UserServiceError::Validation(
            "invalid email format".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserServiceError::Validation("email too long".to_string()));
    }

    Ok(())
}
