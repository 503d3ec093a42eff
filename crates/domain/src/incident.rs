// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident records and the aggregate shapes reported over them.

use serde::Serialize;

use crate::error::DomainError;
use crate::types::{Category, IncidentStatus, IncidentTimestamp, Severity};

/// A validated incident that has not been stored yet.
///
/// Blank optional text fields are normalized to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    timestamp: IncidentTimestamp,
    severity: Severity,
    category: Category,
    status: IncidentStatus,
    description: Option<String>,
    reported_by: Option<String>,
}

impl NewIncident {
    #[must_use]
    pub const fn new(
        timestamp: IncidentTimestamp,
        severity: Severity,
        category: Category,
        status: IncidentStatus,
    ) -> Self {
        Self {
            timestamp,
            severity,
            category,
            status,
            description: None,
            reported_by: None,
        }
    }

    /// Parses every field of an incident from raw text.
    ///
    /// # Errors
    ///
    /// Returns the `DomainError` of the first field that fails validation.
    pub fn parse(
        timestamp: &str,
        severity: &str,
        category: &str,
        status: &str,
        description: Option<&str>,
        reported_by: Option<&str>,
    ) -> Result<Self, DomainError> {
        let incident: Self = Self::new(
            IncidentTimestamp::parse(timestamp)?,
            severity.parse()?,
            Category::new(category)?,
            status.parse()?,
        );

        Ok(incident
            .with_description(description.unwrap_or_default())
            .with_reported_by(reported_by.unwrap_or_default()))
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = non_blank(description);
        self
    }

    #[must_use]
    pub fn with_reported_by(mut self, reported_by: &str) -> Self {
        self.reported_by = non_blank(reported_by);
        self
    }

    #[must_use]
    pub const fn timestamp(&self) -> &IncidentTimestamp {
        &self.timestamp
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub const fn status(&self) -> IncidentStatus {
        self.status
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn reported_by(&self) -> Option<&str> {
        self.reported_by.as_deref()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A stored incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Incident {
    /// Store-assigned identifier. Never changes once assigned.
    pub incident_id: i64,
    pub timestamp: String,
    pub severity: Severity,
    pub category: String,
    /// The only field that may change after insertion.
    pub status: IncidentStatus,
    pub description: Option<String>,
    pub reported_by: Option<String>,
}

/// One row of a grouped count, e.g. `("Phishing", 12)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    /// The group key (a category or a status).
    pub label: String,
    /// Number of incidents in the group.
    pub count: usize,
}

impl AggregateRow {
    #[must_use]
    pub fn new(label: &str, count: usize) -> Self {
        Self {
            label: label.to_string(),
            count,
        }
    }
}

/// Incidents per category within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCategoryCount {
    /// Month bucket in `YYYY-MM` form.
    pub month: String,
    pub category: String,
    pub count: usize,
}
