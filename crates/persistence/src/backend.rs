// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module is limited to:
//! - Connection initialization
//! - Migration execution
//! - SQLite-specific configuration (PRAGMA statements)
//! - Schema introspection through `sqlite_master`
//!
//! All domain queries and mutations live in `queries/` or `mutations/`.

use std::time::Duration;

use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Embedded schema migrations, one per table.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Helper row struct for `sqlite_master` queries.
///
/// Raw SQL is justified here as Diesel has no catalog DSL.
#[derive(QueryableByName)]
struct TableNameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Helper row struct for `PRAGMA journal_mode`.
#[derive(QueryableByName)]
struct JournalModeRow {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

/// Opens a raw connection to `database_url`.
///
/// # Errors
///
/// Returns `StorageInit` if the database cannot be opened.
pub fn establish(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    debug!(database_url, "Opening SQLite connection");
    SqliteConnection::establish(database_url).map_err(Into::into)
}

/// Sets how long statements wait on a locked database.
///
/// # Errors
///
/// Returns `StorageInit` if the PRAGMA statement fails.
pub fn set_busy_timeout(
    conn: &mut SqliteConnection,
    timeout: Duration,
) -> Result<(), PersistenceError> {
    // PRAGMA arguments cannot be bound; the value is an integer we format ourselves.
    let millis: u128 = timeout.as_millis();
    diesel::sql_query(format!("PRAGMA busy_timeout = {millis}"))
        .execute(conn)
        .map_err(|e| PersistenceError::StorageInit(e.to_string()))?;
    Ok(())
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// WAL (Write-Ahead Logging) lets readers proceed while a writer holds the
/// lock.
///
/// # Errors
///
/// Returns `StorageInit` if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let mode: String = diesel::sql_query("PRAGMA journal_mode = WAL")
        .get_result::<JournalModeRow>(conn)
        .map_err(|e| PersistenceError::StorageInit(e.to_string()))?
        .journal_mode;

    debug!(journal_mode = %mode, "Journal mode set");
    Ok(())
}

/// Run pending migrations on the provided connection.
///
/// The pending list is computed and applied under one `BEGIN IMMEDIATE`
/// transaction, so openers racing on a fresh file wait for each other and
/// only the first applies anything. Each migration also runs in its own
/// savepoint, so a failure leaves no half-created table behind.
///
/// # Errors
///
/// Returns `StorageInit` if migration execution fails.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let applied: usize = conn
        .immediate_transaction::<_, PersistenceError, _>(|conn| {
            conn.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.len())
                .map_err(|e| PersistenceError::StorageInit(format!("Migration failed: {e}")))
        })
        .map_err(|e| match e {
            PersistenceError::StorageInit(_) => e,
            other => PersistenceError::StorageInit(format!("Migration failed: {other}")),
        })?;

    info!(applied, "SQLite migrations complete");
    Ok(())
}

/// Lists user tables, sorted by name.
///
/// Internal `SQLite` tables and Diesel's migration bookkeeping are excluded.
///
/// # Errors
///
/// Returns `StorageIo` if the catalog query fails.
pub fn table_names(conn: &mut SqliteConnection) -> Result<Vec<String>, PersistenceError> {
    let rows: Vec<TableNameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' AND name <> ? \
         ORDER BY name",
    )
    .bind::<Text, _>("__diesel_schema_migrations")
    .load(conn)?;

    Ok(rows.into_iter().map(|row| row.name).collect())
}
