// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk CSV ingestion.
//!
//! A CSV file is appended to one of a fixed set of tables. Columns are
//! matched to fields by header name; extra columns are ignored, as is any
//! primary key column in the file. A load is all-or-nothing: the rows go in
//! under one transaction, and the first bad row rolls everything back.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use diesel::{Connection, SqliteConnection};
use intel_platform_domain::NewIncident;
use serde::Deserialize;
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::bulk::{insert_dataset, insert_ticket};
use crate::mutations::incidents::insert_incident;

/// Tables that accept bulk CSV loads.
///
/// `users` is deliberately absent: accounts only enter through registration
/// or the legacy credential import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkTable {
    CyberIncidents,
    DatasetsMetadata,
    ItTickets,
}

impl BulkTable {
    pub const ALL: [Self; 3] = [Self::CyberIncidents, Self::DatasetsMetadata, Self::ItTickets];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CyberIncidents => "cyber_incidents",
            Self::DatasetsMetadata => "datasets_metadata",
            Self::ItTickets => "it_tickets",
        }
    }
}

impl FromStr for BulkTable {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == s.trim())
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(Self::as_str).collect();
                PersistenceError::invalid_input(
                    "table",
                    format!(
                        "'{s}' does not accept bulk loads (expected one of: {})",
                        allowed.join(", ")
                    ),
                )
            })
    }
}

impl std::fmt::Display for BulkTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IncidentCsvRecord {
    pub timestamp: String,
    pub severity: String,
    pub category: String,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reported_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatasetCsvRecord {
    pub dataset_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub record_count: Option<i64>,
    #[serde(default)]
    pub file_size_mb: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TicketCsvRecord {
    pub ticket_id: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub resolved_date: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

/// Opens a source file, mapping a missing path to `FileNotFound`.
pub(crate) fn open_source(path: &Path) -> Result<File, PersistenceError> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PersistenceError::FileNotFound(path.to_path_buf())
        } else {
            PersistenceError::StorageIo(format!("Cannot read {}: {e}", path.display()))
        }
    })
}

/// Builds the error for a rejected CSV row. `line` is 1-based and counts the
/// header.
fn bad_row(line: usize, message: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::invalid_input("csv", format!("line {line}: {message}"))
}

fn require_text(line: usize, column: &str, value: &str) -> Result<(), PersistenceError> {
    if value.trim().is_empty() {
        return Err(bad_row(line, format!("'{column}' cannot be empty")));
    }
    Ok(())
}

/// Deserializes every record, calling `insert` for each. Returns rows appended.
fn load_records<R, T, F>(
    conn: &mut SqliteConnection,
    reader: &mut csv::Reader<R>,
    mut insert: F,
) -> Result<usize, PersistenceError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
    F: FnMut(&mut SqliteConnection, usize, T) -> Result<usize, PersistenceError>,
{
    let mut appended: usize = 0;
    for (index, result) in reader.deserialize::<T>().enumerate() {
        let line: usize = index + 2;
        let record: T = result.map_err(|e| {
            if e.is_io_error() {
                PersistenceError::from(e)
            } else {
                bad_row(line, e)
            }
        })?;
        appended += insert(conn, line, record)?;
    }
    Ok(appended)
}

/// Appends the rows of a CSV source to `table`. Returns rows appended.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first bad row, `AlreadyExists` if a row
/// breaks a uniqueness constraint, or a storage error. Nothing is appended
/// on error.
pub(crate) fn load_csv_from_reader<R: Read>(
    conn: &mut SqliteConnection,
    source: R,
    table: BulkTable,
) -> Result<usize, PersistenceError> {
    let mut reader: csv::Reader<R> = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let appended: usize = conn.transaction::<_, PersistenceError, _>(|conn| match table {
        BulkTable::CyberIncidents => {
            load_records(conn, &mut reader, |conn, line, record: IncidentCsvRecord| {
                let incident: NewIncident = NewIncident::parse(
                    &record.timestamp,
                    &record.severity,
                    &record.category,
                    &record.status,
                    record.description.as_deref(),
                    record.reported_by.as_deref(),
                )
                .map_err(|e| bad_row(line, e))?;
                insert_incident(conn, &incident)?;
                Ok(1)
            })
        }
        BulkTable::DatasetsMetadata => {
            load_records(conn, &mut reader, |conn, line, record: DatasetCsvRecord| {
                require_text(line, "dataset_name", &record.dataset_name)?;
                insert_dataset(conn, &record)
            })
        }
        BulkTable::ItTickets => {
            load_records(conn, &mut reader, |conn, line, record: TicketCsvRecord| {
                require_text(line, "ticket_id", &record.ticket_id)?;
                require_text(line, "subject", &record.subject)?;
                insert_ticket(conn, &record)
            })
        }
    })?;

    info!(table = %table, appended, "Bulk CSV load complete");
    Ok(appended)
}

/// Appends the rows of the CSV file at `path` to `table`.
///
/// # Errors
///
/// Returns `FileNotFound` if `path` does not exist, otherwise as
/// [`load_csv_from_reader`].
pub(crate) fn load_csv_file(
    conn: &mut SqliteConnection,
    path: &Path,
    table: BulkTable,
) -> Result<usize, PersistenceError> {
    let file: File = open_source(path)?;
    info!(path = %path.display(), table = %table, "Loading CSV");
    load_csv_from_reader(conn, file, table)
}
