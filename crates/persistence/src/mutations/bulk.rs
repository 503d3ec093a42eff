// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row inserts for the metadata tables fed by bulk CSV loads.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::csv_load::{DatasetCsvRecord, TicketCsvRecord};
use crate::diesel_schema::{datasets_metadata, it_tickets};
use crate::error::PersistenceError;

/// Appends one dataset metadata row.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn insert_dataset(
    conn: &mut SqliteConnection,
    record: &DatasetCsvRecord,
) -> Result<usize, PersistenceError> {
    diesel::insert_into(datasets_metadata::table)
        .values((
            datasets_metadata::dataset_name.eq(record.dataset_name.trim()),
            datasets_metadata::category.eq(record.category.as_deref()),
            datasets_metadata::source.eq(record.source.as_deref()),
            datasets_metadata::last_updated.eq(record.last_updated.as_deref()),
            datasets_metadata::record_count.eq(record.record_count),
            datasets_metadata::file_size_mb.eq(record.file_size_mb),
        ))
        .execute(conn)
        .map_err(Into::into)
}

/// Appends one IT ticket row.
///
/// # Errors
///
/// Returns `AlreadyExists` if the ticket id is already present, or a storage error.
pub fn insert_ticket(
    conn: &mut SqliteConnection,
    record: &TicketCsvRecord,
) -> Result<usize, PersistenceError> {
    diesel::insert_into(it_tickets::table)
        .values((
            it_tickets::ticket_id.eq(record.ticket_id.trim()),
            it_tickets::priority.eq(record.priority.as_deref()),
            it_tickets::status.eq(record.status.as_deref()),
            it_tickets::category.eq(record.category.as_deref()),
            it_tickets::subject.eq(record.subject.trim()),
            it_tickets::description.eq(record.description.as_deref()),
            it_tickets::created_date.eq(record.created_date.as_deref()),
            it_tickets::resolved_date.eq(record.resolved_date.as_deref()),
            it_tickets::assigned_to.eq(record.assigned_to.as_deref()),
        ))
        .execute(conn)
        .map_err(|e| match PersistenceError::from(e) {
            PersistenceError::AlreadyExists(_) => PersistenceError::AlreadyExists(format!(
                "Ticket '{}' already exists",
                record.ticket_id.trim()
            )),
            other => other,
        })
}
