// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces the shape rules a password must satisfy before it is
//! ever hashed or written to storage.

use thiserror::Error;

/// Symbols that satisfy the "special character" requirement.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+=-{}[]:;\"'<>,.?/";

/// Longest password accepted, in bytes. bcrypt ignores input beyond this
/// point, so multi-byte characters count against it.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password policy errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password is too long.
    #[error("Password must be at most {max_length} characters long")]
    TooLong { max_length: usize },

    /// Password encodes to more bytes than the hasher accepts.
    #[error("Password must be at most {max_bytes} bytes long")]
    TooManyBytes { max_bytes: usize },

    /// Password contains whitespace.
    #[error("Password must not contain whitespace")]
    ContainsWhitespace,

    /// Password is missing one or more required character classes.
    #[error("Password must contain at least one {missing}")]
    MissingCharacterClasses { missing: String },
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    pub min_length: usize,
    /// Maximum password length in characters.
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            max_length: 50,
        }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// A valid password has a length within bounds, fits in
    /// [`MAX_PASSWORD_BYTES`] bytes, has no whitespace, and has at
    /// least one lowercase letter, uppercase letter, digit and symbol from
    /// [`PASSWORD_SYMBOLS`].
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` describing the first rule that failed.
    pub fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        let length: usize = password.chars().count();

        if length < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        if length > self.max_length {
            return Err(PasswordPolicyError::TooLong {
                max_length: self.max_length,
            });
        }

        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooManyBytes {
                max_bytes: MAX_PASSWORD_BYTES,
            });
        }

        if password.chars().any(char::is_whitespace) {
            return Err(PasswordPolicyError::ContainsWhitespace);
        }

        let missing: Vec<&'static str> = Self::missing_classes(password);
        if !missing.is_empty() {
            return Err(PasswordPolicyError::MissingCharacterClasses {
                missing: missing.join(", "),
            });
        }

        Ok(())
    }

    /// Lists the required character classes absent from a password.
    fn missing_classes(password: &str) -> Vec<&'static str> {
        let mut has_uppercase: bool = false;
        let mut has_lowercase: bool = false;
        let mut has_digit: bool = false;
        let mut has_symbol: bool = false;

        for c in password.chars() {
            if c.is_ascii_uppercase() {
                has_uppercase = true;
            } else if c.is_ascii_lowercase() {
                has_lowercase = true;
            } else if c.is_ascii_digit() {
                has_digit = true;
            } else if PASSWORD_SYMBOLS.contains(c) {
                has_symbol = true;
            }
        }

        let mut missing: Vec<&'static str> = Vec::new();
        if !has_lowercase {
            missing.push("lowercase letter");
        }
        if !has_uppercase {
            missing.push("uppercase letter");
        }
        if !has_digit {
            missing.push("digit");
        }
        if !has_symbol {
            missing.push("symbol");
        }

        missing
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert!(policy.validate("Valid1!").is_ok());
        assert!(policy.validate("MyP@ssw0rd123").is_ok());

        // Exactly at both bounds
        assert!(policy.validate("Aa1!aa").is_ok());
        let fifty: String = format!("Aa1!{}", "x".repeat(46));
        assert!(policy.validate(&fifty).is_ok());
    }

    #[test]
    fn test_password_too_short() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert_eq!(
            policy.validate("short"),
            Err(PasswordPolicyError::TooShort { min_length: 6 })
        );
    }

    #[test]
    fn test_password_too_long() {
        let policy: PasswordPolicy = PasswordPolicy::default();
        let long: String = format!("Aa1!{}", "x".repeat(47));

        assert_eq!(
            policy.validate(&long),
            Err(PasswordPolicyError::TooLong { max_length: 50 })
        );
    }

    #[test]
    fn test_multibyte_password_over_byte_limit() {
        let policy: PasswordPolicy = PasswordPolicy::default();
        // 50 characters but 96 bytes
        let accented: String = format!("Aa1!{}", "é".repeat(46));

        assert_eq!(accented.chars().count(), 50);
        assert_eq!(
            policy.validate(&accented),
            Err(PasswordPolicyError::TooManyBytes {
                max_bytes: MAX_PASSWORD_BYTES
            })
        );

        // 34 bytes is fine
        assert!(policy.validate(&format!("Aa1!{}", "é".repeat(15))).is_ok());
    }

    #[test]
    fn test_password_with_whitespace() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert_eq!(
            policy.validate("Valid 1!"),
            Err(PasswordPolicyError::ContainsWhitespace)
        );
        assert_eq!(
            policy.validate("Valid\t1!"),
            Err(PasswordPolicyError::ContainsWhitespace)
        );
    }

    #[test]
    fn test_missing_character_classes_are_listed() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        assert_eq!(
            policy.validate("alllowercase"),
            Err(PasswordPolicyError::MissingCharacterClasses {
                missing: String::from("uppercase letter, digit, symbol")
            })
        );

        assert_eq!(
            policy.validate("NoSymbol123"),
            Err(PasswordPolicyError::MissingCharacterClasses {
                missing: String::from("symbol")
            })
        );
    }

    #[test]
    fn test_symbol_must_come_from_fixed_set() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        // '~' and '|' are not in the accepted set
        assert!(policy.validate("Valid1~|").is_err());
        assert!(policy.validate("Valid1?").is_ok());
    }
}
