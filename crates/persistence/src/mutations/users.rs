// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use intel_platform_domain::Role;
use tracing::debug;

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Inserts a user account and returns its id.
///
/// The password must already be hashed.
///
/// # Errors
///
/// Returns `AlreadyExists` if the username is taken, or a storage error.
pub fn insert_user(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<i64, PersistenceError> {
    let user_id: i64 = diesel::insert_into(users::table)
        .values((
            users::username.eq(username),
            users::password_hash.eq(password_hash),
            users::role.eq(role.as_str()),
        ))
        .returning(users::id)
        .get_result(conn)
        .map_err(|e| match PersistenceError::from(e) {
            PersistenceError::AlreadyExists(_) => {
                PersistenceError::AlreadyExists(format!("Username '{username}' is already taken"))
            }
            other => other,
        })?;

    debug!(user_id, username, "Inserted user");
    Ok(user_id)
}

/// Inserts a user account unless the username is already taken.
///
/// Returns `true` if a row was written.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub fn insert_user_if_absent(
    conn: &mut SqliteConnection,
    username: &str,
    password_hash: &str,
) -> Result<bool, PersistenceError> {
    let inserted: usize = diesel::insert_or_ignore_into(users::table)
        .values((
            users::username.eq(username),
            users::password_hash.eq(password_hash),
            users::role.eq(Role::User.as_str()),
        ))
        .execute(conn)?;

    Ok(inserted == 1)
}
