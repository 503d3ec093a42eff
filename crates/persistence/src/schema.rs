// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store initialization.
//!
//! Opening a store is idempotent: the location is created if missing, and
//! migrations only add tables that do not exist yet. Existing data is never
//! dropped or altered, so this runs on every process start.

use std::path::Path;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use tracing::info;

use crate::Store;
use crate::backend;
use crate::config::{StoreConfig, StoreLocation};
use crate::credentials::CredentialHasher;
use crate::error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each in-memory store receives a unique sequential name, so stores opened
/// in the same process never share data.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

fn in_memory_url() -> String {
    let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("file:memdb_{db_id}?mode=memory&cache=shared")
}

/// Creates the parent directory of a database file and returns its URL.
fn prepare_file_location(path: &Path) -> Result<String, PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            PersistenceError::StorageInit(format!(
                "Cannot create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    path.to_str().map(ToString::to_string).ok_or_else(|| {
        PersistenceError::StorageInit(format!(
            "Database path is not valid UTF-8: {}",
            path.display()
        ))
    })
}

/// Opens the configured store, creating the location and any missing tables.
///
/// # Errors
///
/// Returns `InvalidInput` if the configured hash cost is out of range, and
/// `StorageInit` if the location cannot be created, opened or migrated.
pub fn ensure_store_ready(config: &StoreConfig) -> Result<Store, PersistenceError> {
    let hasher: CredentialHasher = CredentialHasher::new(config.hash_cost)?;

    let (database_url, is_file): (String, bool) = match &config.location {
        StoreLocation::File(path) => (prepare_file_location(path)?, true),
        StoreLocation::InMemory => (in_memory_url(), false),
    };

    info!(database_url = %database_url, "Opening store");

    let mut conn: SqliteConnection = backend::establish(&database_url)?;
    backend::set_busy_timeout(&mut conn, config.busy_timeout)?;
    if is_file {
        backend::enable_wal_mode(&mut conn)?;
    }
    backend::run_migrations(&mut conn)?;

    Ok(Store {
        conn,
        hasher,
        timing_equalizer_hash: OnceLock::new(),
        database_url,
    })
}
