// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident repository: CRUD plus aggregate views.

use intel_platform_domain::{AggregateRow, Incident, IncidentStatus, MonthlyCategoryCount, NewIncident};
use tracing::{debug, info};

use crate::Store;
use crate::error::PersistenceError;
use crate::mutations::incidents::{delete_incident, insert_incident, update_incident_status};
use crate::queries::aggregates;
use crate::queries::incidents::{count_incidents, get_incident, list_incidents};

/// Reads and writes incidents through a borrowed [`Store`].
///
/// A missing id is a normal outcome: updates and deletes report zero
/// affected rows instead of failing.
pub struct IncidentRepository<'s> {
    store: &'s mut Store,
}

impl<'s> IncidentRepository<'s> {
    pub(crate) const fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    /// Records a new incident and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails.
    pub fn insert(&mut self, incident: &NewIncident) -> Result<i64, PersistenceError> {
        let incident_id: i64 = insert_incident(&mut self.store.conn, incident)?;
        info!(
            incident_id,
            severity = %incident.severity(),
            category = incident.category().as_str(),
            "Recorded incident"
        );
        Ok(incident_id)
    }

    /// Changes the status of an incident. Returns 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the update fails.
    pub fn update_status(
        &mut self,
        incident_id: i64,
        status: IncidentStatus,
    ) -> Result<usize, PersistenceError> {
        let affected: usize = update_incident_status(&mut self.store.conn, incident_id, status)?;
        info!(incident_id, status = %status, affected, "Updated incident status");
        Ok(affected)
    }

    /// Hard-deletes an incident. Returns 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails.
    pub fn delete(&mut self, incident_id: i64) -> Result<usize, PersistenceError> {
        let affected: usize = delete_incident(&mut self.store.conn, incident_id)?;
        info!(incident_id, affected, "Deleted incident");
        Ok(affected)
    }

    /// # Errors
    ///
    /// Returns a storage error, or `CorruptRecord` if the stored row cannot
    /// be represented.
    pub fn get(&mut self, incident_id: i64) -> Result<Option<Incident>, PersistenceError> {
        get_incident(&mut self.store.conn, incident_id)?
            .map(Incident::try_from)
            .transpose()
    }

    /// Lists every incident in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error, or `CorruptRecord` if a stored row cannot be
    /// represented.
    pub fn list_all(&mut self) -> Result<Vec<Incident>, PersistenceError> {
        let incidents: Vec<Incident> = list_incidents(&mut self.store.conn)?
            .into_iter()
            .map(Incident::try_from)
            .collect::<Result<_, _>>()?;
        debug!(count = incidents.len(), "Listed incidents");
        Ok(incidents)
    }

    /// # Errors
    ///
    /// Returns a storage error.
    pub fn count(&mut self) -> Result<usize, PersistenceError> {
        count_incidents(&mut self.store.conn)
    }

    /// Incident counts per category, largest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn count_by_category(&mut self) -> Result<Vec<AggregateRow>, PersistenceError> {
        aggregates::count_by_category(&mut self.store.conn)
    }

    /// Counts of `High` severity incidents per status, largest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn count_high_severity_by_status(&mut self) -> Result<Vec<AggregateRow>, PersistenceError> {
        aggregates::count_high_severity_by_status(&mut self.store.conn)
    }

    /// Categories with strictly more than `min_count` incidents, largest first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `min_count` is negative, or a storage error.
    pub fn categories_above_threshold(
        &mut self,
        min_count: i64,
    ) -> Result<Vec<AggregateRow>, PersistenceError> {
        if min_count < 0 {
            return Err(PersistenceError::invalid_input(
                "min_count",
                format!("Threshold cannot be negative (got {min_count})"),
            ));
        }
        aggregates::categories_above_threshold(&mut self.store.conn, min_count)
    }

    /// Incident counts per month and category, oldest month first.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn count_by_month_and_category(
        &mut self,
    ) -> Result<Vec<MonthlyCategoryCount>, PersistenceError> {
        aggregates::count_by_month_and_category(&mut self.store.conn)
    }
}
