// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::password_policy::PasswordPolicyError;

/// Errors that can occur during domain validation.
///
/// Every variant describes caller input that failed a shape rule. None of
/// them are retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username failed the shape rules.
    InvalidUsername(String),
    /// Password failed the password policy.
    InvalidPassword(PasswordPolicyError),
    /// Role is not one of the known roles.
    InvalidRole(String),
    /// Severity is not `Low`, `Medium` or `High`.
    InvalidSeverity(String),
    /// Status is not `Open`, `Investigating` or `Closed`.
    InvalidStatus(String),
    /// Category is empty or too long.
    InvalidCategory(String),
    /// Timestamp is not a date or a date-time.
    InvalidTimestamp {
        /// The rejected value.
        value: String,
        /// The parser's explanation.
        error: String,
    },
}

impl DomainError {
    /// Returns the name of the input field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidUsername(_) => "username",
            Self::InvalidPassword(_) => "password",
            Self::InvalidRole(_) => "role",
            Self::InvalidSeverity(_) => "severity",
            Self::InvalidStatus(_) => "status",
            Self::InvalidCategory(_) => "category",
            Self::InvalidTimestamp { .. } => "timestamp",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidPassword(err) => write!(f, "Invalid password: {err}"),
            Self::InvalidRole(role) => write!(f, "Invalid role: '{role}'"),
            Self::InvalidSeverity(value) => {
                write!(
                    f,
                    "Invalid severity: '{value}' (must be Low, Medium, or High)"
                )
            }
            Self::InvalidStatus(value) => {
                write!(
                    f,
                    "Invalid status: '{value}' (must be Open, Investigating, or Closed)"
                )
            }
            Self::InvalidCategory(msg) => write!(f, "Invalid category: {msg}"),
            Self::InvalidTimestamp { value, error } => {
                write!(f, "Invalid timestamp '{value}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl From<PasswordPolicyError> for DomainError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::InvalidPassword(err)
    }
}
