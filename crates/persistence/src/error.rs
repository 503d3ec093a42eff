// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;

use diesel::result::DatabaseErrorKind;
use intel_platform_domain::DomainError;
use thiserror::Error;

/// Why an authentication attempt was refused.
///
/// Only visible to code holding the error value; it is never rendered by
/// `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureReason {
    /// No account exists with the supplied username.
    UnknownUser,
    /// The account exists but the password did not verify.
    WrongPassword,
}

/// Errors returned by the store and its repositories.
///
/// Raw Diesel, CSV and filesystem errors are translated into these variants
/// at the crate boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Input failed shape validation. Never retried.
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// A uniqueness constraint rejected the write.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Login refused. The message is identical for every reason.
    #[error("Invalid username or password")]
    AuthenticationFailed { reason: AuthFailureReason },

    /// The store location could not be created, opened or migrated.
    #[error("Storage initialization failed: {0}")]
    StorageInit(String),

    /// A statement failed while the store was in use. Safe to retry.
    #[error("Storage I/O error: {0}")]
    StorageIo(String),

    /// A source file for an import does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A stored row holds a value the domain cannot represent.
    #[error("Corrupt record in {table} (id {id}): {message}")]
    CorruptRecord {
        table: &'static str,
        id: i64,
        message: String,
    },

    /// The password hasher failed.
    #[error("Credential hashing failed: {0}")]
    CredentialHashing(String),
}

impl PersistenceError {
    /// Builds an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Whether repeating the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageIo(_))
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::AlreadyExists(info.message().to_string())
            }
            _ => Self::StorageIo(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::StorageInit(err.to_string())
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Self::StorageIo(err.to_string())
        } else {
            Self::invalid_input("csv", err.to_string())
        }
    }
}
