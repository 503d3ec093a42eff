// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and validation rules for the incident intelligence platform.
//!
//! Everything in this crate is pure: no I/O, no clocks except
//! [`IncidentTimestamp::now_utc`], and no storage. Shape validation happens
//! here so that the persistence layer can reject bad input before it ever
//! opens a statement.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::cargo_common_metadata)]

mod error;
mod incident;
mod password_policy;
mod types;
mod user;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use incident::{AggregateRow, Incident, MonthlyCategoryCount, NewIncident};
pub use password_policy::{
    MAX_PASSWORD_BYTES, PASSWORD_SYMBOLS, PasswordPolicy, PasswordPolicyError,
};
pub use types::{Category, IncidentStatus, IncidentTimestamp, MAX_CATEGORY_LENGTH, Role, Severity};
pub use user::{Session, User};
pub use validation::{
    MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH, validate_password, validate_registration,
    validate_username,
};
