// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! This module contains all state-changing statements for the persistence layer.
//!
//! ## Module Organization
//!
//! - `users` — Account inserts, including insert-if-absent for imports
//! - `incidents` — Incident insert, status update and delete
//! - `bulk` — Row inserts for the bulk-loadable metadata tables
//!
//! Transactions are opened by the callers in the repository layer, never here.

pub mod bulk;
pub mod incidents;
pub mod users;
