// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential store and incident repository for the incident intelligence
//! platform.
//!
//! This crate owns every read and write against the platform's single
//! embedded `SQLite` store. It is built on Diesel with embedded migrations.
//!
//! ## Components
//!
//! - **Credential hasher** (`CredentialHasher`) — salted bcrypt hashing and
//!   constant-time verification
//! - **Schema manager** (`ensure_store_ready`) — idempotent store creation
//! - **User repository** (`UserRepository`) — registration, authentication,
//!   legacy credential import
//! - **Incident repository** (`IncidentRepository`) — incident CRUD and
//!   aggregate views
//! - **Bulk loader** (`Store::load_csv`) — all-or-nothing CSV ingestion
//!
//! ## Store Handle
//!
//! There is no process-wide connection. Callers open a [`Store`] explicitly,
//! borrow repositories from it, and close it at shutdown. Every repository
//! call is committed before it returns.
//!
//! ```no_run
//! use intel_platform_domain::Role;
//! use intel_platform_persistence::{Store, StoreConfig};
//!
//! # fn main() -> Result<(), intel_platform_persistence::PersistenceError> {
//! let mut store = Store::open(&StoreConfig::default())?;
//! store.users().register("analyst1", "Valid1!", Role::User)?;
//! let session = store.users().authenticate("analyst1", "Valid1!")?;
//! store.close();
//! # let _ = session;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing Philosophy
//!
//! - Every test opens its own uniquely named in-memory store
//! - File-backed tests use unique paths under the system temp directory
//! - Tests lower the bcrypt cost to the minimum

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use std::path::Path;
use std::sync::OnceLock;

use diesel::SqliteConnection;
use tracing::info;

mod backend;
mod config;
mod credentials;
mod csv_load;
mod data_models;
mod diesel_schema;
mod error;
mod incidents;
mod mutations;
mod queries;
mod schema;
mod users;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_BUSY_TIMEOUT, DEFAULT_DATABASE_PATH, StoreConfig, StoreLocation};
pub use credentials::{CredentialHasher, MAX_HASH_COST, MAX_PASSWORD_BYTES, MIN_HASH_COST};
pub use csv_load::BulkTable;
pub use error::{AuthFailureReason, PersistenceError};
pub use incidents::IncidentRepository;
pub use schema::ensure_store_ready;
pub use users::{ImportReport, UserRepository};

/// An open handle to the backing store.
///
/// Owns the single connection; repositories borrow it mutably for the
/// duration of a call chain.
pub struct Store {
    pub(crate) conn: SqliteConnection,
    pub(crate) hasher: CredentialHasher,
    /// Hash verified against when a login names an unknown user. Computed on
    /// first use.
    pub(crate) timing_equalizer_hash: OnceLock<String>,
    database_url: String,
}

impl Store {
    /// Opens the store described by `config`. See [`ensure_store_ready`].
    ///
    /// # Errors
    ///
    /// Returns `StorageInit` if the store cannot be created, opened or migrated.
    pub fn open(config: &StoreConfig) -> Result<Self, PersistenceError> {
        ensure_store_ready(config)
    }

    /// Opens a fresh, isolated in-memory store with default settings.
    ///
    /// # Errors
    ///
    /// Returns `StorageInit` if migrations fail.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Opens or creates a file-backed store at `path` with default settings.
    ///
    /// # Errors
    ///
    /// Returns `StorageInit` if the location is unwritable or migrations fail.
    pub fn new_with_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        Self::open(&StoreConfig::file(path))
    }

    /// Borrows the user repository.
    pub const fn users(&mut self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    /// Borrows the incident repository.
    pub const fn incidents(&mut self) -> IncidentRepository<'_> {
        IncidentRepository::new(self)
    }

    #[must_use]
    pub const fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// Lists user tables, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the catalog cannot be read.
    pub fn table_names(&mut self) -> Result<Vec<String>, PersistenceError> {
        backend::table_names(&mut self.conn)
    }

    /// Appends the rows of a CSV file to `table_name`. Returns rows appended.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `table_name` is not bulk-loadable or a row
    /// is bad, `FileNotFound` if `path` does not exist, `AlreadyExists` if a
    /// row breaks a uniqueness constraint, or a storage error. Nothing is
    /// appended on error.
    pub fn load_csv(
        &mut self,
        path: impl AsRef<Path>,
        table_name: &str,
    ) -> Result<usize, PersistenceError> {
        let table: BulkTable = table_name.parse()?;
        csv_load::load_csv_file(&mut self.conn, path.as_ref(), table)
    }

    /// Appends CSV rows read from `source` to `table`.
    ///
    /// # Errors
    ///
    /// As [`Store::load_csv`], minus `FileNotFound`.
    pub fn load_csv_from_reader<R: std::io::Read>(
        &mut self,
        source: R,
        table: BulkTable,
    ) -> Result<usize, PersistenceError> {
        csv_load::load_csv_from_reader(&mut self.conn, source, table)
    }

    /// Closes the store.
    pub fn close(self) {
        info!(database_url = %self.database_url, "Closing store");
        drop(self.conn);
    }
}
