// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident mutations.
//!
//! Each function is a single statement, so each is atomic on its own row.

use diesel::prelude::*;
use diesel::SqliteConnection;
use intel_platform_domain::{IncidentStatus, NewIncident};

use crate::diesel_schema::cyber_incidents;
use crate::error::PersistenceError;

/// Inserts an incident and returns its id.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn insert_incident(
    conn: &mut SqliteConnection,
    incident: &NewIncident,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(cyber_incidents::table)
        .values((
            cyber_incidents::timestamp.eq(incident.timestamp().as_str()),
            cyber_incidents::severity.eq(incident.severity().as_str()),
            cyber_incidents::category.eq(incident.category().as_str()),
            cyber_incidents::status.eq(incident.status().as_str()),
            cyber_incidents::description.eq(incident.description()),
            cyber_incidents::reported_by.eq(incident.reported_by()),
        ))
        .returning(cyber_incidents::incident_id)
        .get_result(conn)
        .map_err(Into::into)
}

/// Sets the status of one incident. Returns the number of rows changed.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn update_incident_status(
    conn: &mut SqliteConnection,
    incident_id: i64,
    status: IncidentStatus,
) -> Result<usize, PersistenceError> {
    diesel::update(cyber_incidents::table.find(incident_id))
        .set(cyber_incidents::status.eq(status.as_str()))
        .execute(conn)
        .map_err(Into::into)
}

/// Deletes one incident. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn delete_incident(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<usize, PersistenceError> {
    diesel::delete(cyber_incidents::table.find(incident_id))
        .execute(conn)
        .map_err(Into::into)
}
