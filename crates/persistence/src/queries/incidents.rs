// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::IncidentRow;
use crate::diesel_schema::cyber_incidents;
use crate::error::PersistenceError;
use crate::queries::to_count;

/// Retrieves one incident by id.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn get_incident(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<Option<IncidentRow>, PersistenceError> {
    cyber_incidents::table
        .find(incident_id)
        .select(IncidentRow::as_select())
        .first::<IncidentRow>(conn)
        .optional()
        .map_err(Into::into)
}

/// Lists every incident in insertion order.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_incidents(conn: &mut SqliteConnection) -> Result<Vec<IncidentRow>, PersistenceError> {
    cyber_incidents::table
        .select(IncidentRow::as_select())
        .order(cyber_incidents::incident_id.asc())
        .load::<IncidentRow>(conn)
        .map_err(Into::into)
}

/// Counts incidents.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_incidents(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = cyber_incidents::table.count().get_result(conn)?;
    to_count(count)
}
