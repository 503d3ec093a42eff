// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries.
//!
//! ## Module Organization
//!
//! - `users` — User lookups and listing
//! - `incidents` — Single-incident lookups and listing
//! - `aggregates` — Grouped counts over incidents
//!
//! Every value reaching SQL is a bound parameter. Raw SQL appears only where
//! Diesel has no DSL (the `strftime` month bucket).

pub mod aggregates;
pub mod incidents;
pub mod users;

use num_traits::ToPrimitive;

use crate::error::PersistenceError;

/// Converts a SQL `COUNT` result into a `usize`.
pub(crate) fn to_count(value: i64) -> Result<usize, PersistenceError> {
    value
        .to_usize()
        .ok_or_else(|| PersistenceError::StorageIo(format!("Count conversion failed: {value}")))
}
