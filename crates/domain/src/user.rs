// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;
use time::OffsetDateTime;

use crate::types::Role;

/// A stored user account.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Salted bcrypt hash. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
}

// Hand-written so hashes never end up in logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// The identity established by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub authenticated_at: OffsetDateTime,
}
