// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Date-only incident timestamp layout.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Date-time incident timestamp layout.
const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Maximum length of an incident category, in characters.
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// The role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular analyst account.
    #[default]
    User,
    /// Administrative account.
    Admin,
}

impl Role {
    /// Converts this role to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How serious an incident is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Converts this severity to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::InvalidSeverity(s.to_string()))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an incident is in its handling lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    Open,
    Investigating,
    Closed,
}

impl IncidentStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Open, Self::Investigating, Self::Closed];

    /// Converts this status to its stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Investigating => "Investigating",
            Self::Closed => "Closed",
        }
    }
}

impl FromStr for IncidentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A free-form incident category such as `Phishing` or `DDos`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Category(String);

impl Category {
    /// Trims and validates a category.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCategory` if the trimmed value is empty or
    /// longer than [`MAX_CATEGORY_LENGTH`] characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCategory(String::from(
                "Category cannot be empty",
            )));
        }
        if trimmed.chars().count() > MAX_CATEGORY_LENGTH {
            return Err(DomainError::InvalidCategory(format!(
                "Category must be at most {MAX_CATEGORY_LENGTH} characters long"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// When an incident happened.
///
/// Accepts either a calendar date (`2024-03-01`) or a date-time
/// (`2024-03-01 14:05:00`). The original text is kept as-is so stored values
/// round-trip exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IncidentTimestamp(String);

impl IncidentTimestamp {
    /// Parses and validates a timestamp string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if the value is neither a
    /// `YYYY-MM-DD` date nor a `YYYY-MM-DD HH:MM:SS` date-time.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();

        let parsed: Result<(), time::error::Parse> = if trimmed.len() > 10 {
            PrimitiveDateTime::parse(trimmed, DATETIME_FORMAT).map(|_| ())
        } else {
            Date::parse(trimmed, DATE_FORMAT).map(|_| ())
        };

        parsed.map_err(|e| DomainError::InvalidTimestamp {
            value: value.to_string(),
            error: e.to_string(),
        })?;

        Ok(Self(trimmed.to_string()))
    }

    /// Formats a date-time as an incident timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if formatting fails.
    pub fn from_datetime(datetime: PrimitiveDateTime) -> Result<Self, DomainError> {
        datetime
            .format(DATETIME_FORMAT)
            .map(Self)
            .map_err(|e| DomainError::InvalidTimestamp {
                value: datetime.to_string(),
                error: e.to_string(),
            })
    }

    /// Returns the current UTC time as an incident timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if formatting fails.
    pub fn now_utc() -> Result<Self, DomainError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        Self::from_datetime(PrimitiveDateTime::new(now.date(), now.time()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IncidentTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
