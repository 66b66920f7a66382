use thiserror::Error;

use crate::{
    authentication::auth::hash_password,
    data_access::{data_context::DataContext, data_error::DataError},
    field_errors::{FieldErrors, REQUIRED},
    signup_request::SignupRequest,
    user::User,
};

pub const USERNAME_MAX_CHARS: usize = 150;
pub const PASSWORD_MIN_CHARS: usize = 8;

pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";
pub const PASSWORD_MISMATCH: &str = "The two password fields didn’t match.";

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("invalid signup: {0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Validates the form, then creates a staff account for it.
pub fn register(data_context: &DataContext, request: &SignupRequest) -> Result<User, SignupError> {
    validate(request).map_err(SignupError::Invalid)?;

    let username = request.username.trim();
    let user = User::new_staff(username, hash_password(&request.password1).map_err(DataError::from)?);
    match data_context.create_user(&user) {
        Ok(()) => Ok(user),
        Err(DataError::DuplicateUsername(_)) => Err(SignupError::Invalid(FieldErrors::single(
            "username",
            DUPLICATE_USERNAME,
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Checks the form fields without touching storage.
pub fn validate(request: &SignupRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let username = request.username.trim();

    if username.is_empty() {
        errors.add("username", REQUIRED);
    } else if username.chars().count() > USERNAME_MAX_CHARS {
        errors.add(
            "username",
            format!("Ensure this value has at most {USERNAME_MAX_CHARS} characters."),
        );
    } else if !username.chars().all(is_username_char) {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }

    if request.password1.is_empty() {
        errors.add("password1", REQUIRED);
    }
    if request.password2.is_empty() {
        errors.add("password2", REQUIRED);
    }
    if !request.password1.is_empty() && !request.password2.is_empty() {
        if request.password1 != request.password2 {
            errors.add("password2", PASSWORD_MISMATCH);
        } else {
            check_password_strength(&request.password1, username, &mut errors);
        }
    }

    errors.into_result()
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

fn check_password_strength(password: &str, username: &str, errors: &mut FieldErrors) {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        errors.add(
            "password2",
            format!("This password is too short. It must contain at least {PASSWORD_MIN_CHARS} characters."),
        );
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password2", "This password is entirely numeric.");
    }
    if !username.is_empty() && password.eq_ignore_ascii_case(username) {
        errors.add("password2", "The password is too similar to the username.");
    }
}
