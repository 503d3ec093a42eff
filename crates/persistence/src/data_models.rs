// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes as Diesel reads them, and their conversion into domain types.

use diesel::prelude::*;
use intel_platform_domain::{Incident, IncidentStatus, Role, Severity, User};

use crate::diesel_schema::{cyber_incidents, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e: intel_platform_domain::DomainError| PersistenceError::CorruptRecord {
                table: "users",
                id: row.id,
                message: e.to_string(),
            })?;

        Ok(Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

/// Diesel Queryable struct for incident rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = cyber_incidents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IncidentRow {
    pub incident_id: i64,
    pub timestamp: String,
    pub severity: String,
    pub category: String,
    pub status: String,
    pub description: Option<String>,
    pub reported_by: Option<String>,
}

impl TryFrom<IncidentRow> for Incident {
    type Error = PersistenceError;

    fn try_from(row: IncidentRow) -> Result<Self, Self::Error> {
        let corrupt = |message: String| PersistenceError::CorruptRecord {
            table: "cyber_incidents",
            id: row.incident_id,
            message,
        };

        let severity: Severity = row.severity.parse().map_err(
            |e: intel_platform_domain::DomainError| corrupt(e.to_string()),
        )?;
        let status: IncidentStatus = row.status.parse().map_err(
            |e: intel_platform_domain::DomainError| corrupt(e.to_string()),
        )?;

        Ok(Self {
            incident_id: row.incident_id,
            timestamp: row.timestamp,
            severity,
            category: row.category,
            status,
            description: row.description,
            reported_by: row.reported_by,
        })
    }
}
