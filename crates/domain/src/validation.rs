// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::password_policy::PasswordPolicy;

/// Minimum username length in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Validates that a username meets the shape rules.
///
/// This function is pure and never touches storage. It does NOT check for
/// uniqueness (that is enforced by the store).
///
/// # Arguments
///
/// * `username` - The candidate login name
///
/// # Errors
///
/// Returns `DomainError::InvalidUsername` if:
/// - The username is shorter than 3 or longer than 20 characters
/// - The username contains whitespace
/// - The username contains no alphabetic character
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let length: usize = username.chars().count();

    if length < MIN_USERNAME_LENGTH {
        return Err(DomainError::InvalidUsername(format!(
            "Username must be at least {MIN_USERNAME_LENGTH} characters long"
        )));
    }

    if length > MAX_USERNAME_LENGTH {
        return Err(DomainError::InvalidUsername(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters long"
        )));
    }

    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(String::from(
            "Username must not contain whitespace",
        )));
    }

    // Rule: at least one letter, so purely numeric or symbolic names are rejected
    if !username.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::InvalidUsername(String::from(
            "Username must contain at least one letter",
        )));
    }

    Ok(())
}

/// Validates a password against the default password policy.
///
/// # Errors
///
/// Returns `DomainError::InvalidPassword` wrapping the policy violation.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    PasswordPolicy::default()
        .validate(password)
        .map_err(DomainError::from)
}

/// Validates a full registration request: username first, then password.
///
/// # Errors
///
/// Returns the first `DomainError` encountered.
pub fn validate_registration(username: &str, password: &str) -> Result<(), DomainError> {
    validate_username(username)?;
    validate_password(password)
}
