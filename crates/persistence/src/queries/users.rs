// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::queries::to_count;

/// Retrieves a user by exact username match.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserRow>, PersistenceError> {
    users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .optional()
        .map_err(Into::into)
}

/// Lists all users ordered by username.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<UserRow>, PersistenceError> {
    users::table
        .select(UserRow::as_select())
        .order(users::username.asc())
        .load::<UserRow>(conn)
        .map_err(Into::into)
}

/// Counts user accounts.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_users(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = users::table.count().get_result(conn)?;
    to_count(count)
}
