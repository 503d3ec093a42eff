// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password hashing and verification.
//!
//! Hashes are bcrypt strings. The salt is generated per call and embedded in
//! the output, so no separate salt column exists.

pub use intel_platform_domain::MAX_PASSWORD_BYTES;
use tracing::debug;

use crate::error::PersistenceError;

/// Lowest bcrypt cost factor accepted.
pub const MIN_HASH_COST: u32 = 4;

/// Highest bcrypt cost factor accepted.
pub const MAX_HASH_COST: u32 = 31;

/// One-way salted password hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    /// Creates a hasher with the given bcrypt cost factor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `cost` is outside bcrypt's supported range.
    pub fn new(cost: u32) -> Result<Self, PersistenceError> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
            return Err(PersistenceError::invalid_input(
                "hash_cost",
                format!("must be between {MIN_HASH_COST} and {MAX_HASH_COST}"),
            ));
        }
        Ok(Self { cost })
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a password with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the password is empty or longer than
    /// [`MAX_PASSWORD_BYTES`], and `CredentialHashing` if bcrypt fails.
    pub fn hash(&self, password: &str) -> Result<String, PersistenceError> {
        if password.is_empty() {
            return Err(PersistenceError::invalid_input(
                "password",
                "Password cannot be empty",
            ));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PersistenceError::invalid_input(
                "password",
                format!("Password must be at most {MAX_PASSWORD_BYTES} bytes"),
            ));
        }

        bcrypt::hash(password, self.cost)
            .map_err(|e| PersistenceError::CredentialHashing(e.to_string()))
    }

    /// Checks a password against a stored hash.
    ///
    /// Returns `false` for a malformed hash instead of failing. The digest
    /// comparison is constant-time.
    #[must_use]
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        if password.is_empty() || password.len() > MAX_PASSWORD_BYTES {
            return false;
        }

        match bcrypt::verify(password, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                debug!(error = %e, "Stored hash could not be parsed");
                false
            }
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn fast_hasher() -> CredentialHasher {
        CredentialHasher::new(MIN_HASH_COST).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher: CredentialHasher = fast_hasher();
        let hash: String = hasher.hash("Valid1!").unwrap();

        assert!(hash.starts_with("$2"));
        assert!(hasher.verify("Valid1!", &hash));
        assert!(!hasher.verify("Valid2!", &hash));
    }

    #[test]
    fn test_salt_differs_per_call() {
        let hasher: CredentialHasher = fast_hasher();
        let first: String = hasher.hash("Valid1!").unwrap();
        let second: String = hasher.hash("Valid1!").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("Valid1!", &first));
        assert!(hasher.verify("Valid1!", &second));
    }

    #[test]
    fn test_empty_password_rejected() {
        let result = fast_hasher().hash("");
        assert!(matches!(
            result,
            Err(PersistenceError::InvalidInput { ref field, .. }) if field == "password"
        ));
    }

    #[test]
    fn test_oversized_password_rejected() {
        let hasher: CredentialHasher = fast_hasher();

        assert!(hasher.hash(&"a".repeat(MAX_PASSWORD_BYTES)).is_ok());
        assert!(matches!(
            hasher.hash(&"a".repeat(MAX_PASSWORD_BYTES + 1)),
            Err(PersistenceError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        let hasher: CredentialHasher = fast_hasher();

        assert!(!hasher.verify("Valid1!", "not-a-hash"));
        assert!(!hasher.verify("Valid1!", ""));
        assert!(!hasher.verify("", "$2b$04$abcdefghijklmnopqrstuu"));
    }

    #[test]
    fn test_cost_out_of_range_rejected() {
        assert!(CredentialHasher::new(MIN_HASH_COST - 1).is_err());
        assert!(CredentialHasher::new(MAX_HASH_COST + 1).is_err());
        assert_eq!(CredentialHasher::new(MIN_HASH_COST).unwrap().cost(), MIN_HASH_COST);
        assert_eq!(CredentialHasher::new(MAX_HASH_COST).unwrap().cost(), MAX_HASH_COST);
        assert_eq!(CredentialHasher::default().cost(), bcrypt::DEFAULT_COST);
    }
}
