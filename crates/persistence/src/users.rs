// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User repository: registration, authentication and legacy import.

use std::io::{BufRead, BufReader};
use std::path::Path;

use diesel::Connection;
use intel_platform_domain::{Role, Session, User, validate_registration};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::Store;
use crate::csv_load::open_source;
use crate::error::{AuthFailureReason, PersistenceError};
use crate::mutations::users::{insert_user, insert_user_if_absent};
use crate::queries::users::{count_users, find_user_by_username, list_users};

/// Password hashed when a login names an unknown user, so that both failure
/// paths cost one bcrypt verification.
const TIMING_EQUALIZER_PASSWORD: &str = "timing-equalizer";

/// Outcome of a legacy credential import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Rows written.
    pub imported: usize,
    /// Well-formed lines whose username already existed.
    pub skipped_duplicates: usize,
    /// Number of malformed lines.
    pub malformed: usize,
    /// 1-based line numbers of the malformed lines.
    pub malformed_lines: Vec<usize>,
}

/// Returns the unknown-user hash, hashing it on first use.
fn timing_equalizer_hash(store: &Store) -> Result<&str, PersistenceError> {
    if let Some(hash) = store.timing_equalizer_hash.get() {
        return Ok(hash);
    }
    let hash: String = store.hasher.hash(TIMING_EQUALIZER_PASSWORD)?;
    Ok(store.timing_equalizer_hash.get_or_init(|| hash))
}

/// Splits a `username,password_hash` line. Returns `None` if malformed.
fn parse_legacy_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split(',');
    let username: &str = fields.next()?.trim();
    let password_hash: &str = fields.next()?.trim();

    if fields.next().is_some() || username.is_empty() || password_hash.is_empty() {
        return None;
    }
    Some((username, password_hash))
}

/// Reads and writes user accounts through a borrowed [`Store`].
pub struct UserRepository<'s> {
    store: &'s mut Store,
}

impl<'s> UserRepository<'s> {
    pub(crate) const fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    /// Registers a new account and returns its id.
    ///
    /// Username and password shape are checked before storage is touched.
    /// Uniqueness is enforced by the store, so a concurrent registration of
    /// the same name fails here with `AlreadyExists`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed username or password,
    /// `AlreadyExists` if the username is taken, or a storage error.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<i64, PersistenceError> {
        validate_registration(username, password)?;

        if find_user_by_username(&mut self.store.conn, username)?.is_some() {
            debug!(username, "Registration rejected: username taken");
            return Err(PersistenceError::AlreadyExists(format!(
                "Username '{username}' is already taken"
            )));
        }

        let password_hash: String = self.store.hasher.hash(password)?;
        let user_id: i64 = insert_user(&mut self.store.conn, username, &password_hash, role)?;

        info!(user_id, username, role = %role, "Registered user");
        Ok(user_id)
    }

    /// Checks a username and password and opens a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for an unknown user or a wrong password.
    /// The two cases render identically.
    pub fn authenticate(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Session, PersistenceError> {
        let Some(row) = find_user_by_username(&mut self.store.conn, username)? else {
            // Burn one verification so the response time matches a wrong password.
            let equalizer: &str = timing_equalizer_hash(self.store)?;
            let _ = self.store.hasher.verify(password, equalizer);
            debug!(username, "Authentication failed: unknown user");
            return Err(PersistenceError::AuthenticationFailed {
                reason: AuthFailureReason::UnknownUser,
            });
        };

        if !self.store.hasher.verify(password, &row.password_hash) {
            debug!(username, "Authentication failed: wrong password");
            return Err(PersistenceError::AuthenticationFailed {
                reason: AuthFailureReason::WrongPassword,
            });
        }

        let user: User = User::try_from(row)?;
        info!(user_id = user.id, username, "User authenticated");

        Ok(Session {
            user_id: user.id,
            username: user.username,
            role: user.role,
            authenticated_at: OffsetDateTime::now_utc(),
        })
    }

    /// Imports `username,password_hash` lines from a legacy credential file.
    ///
    /// Hashes are stored as given. Existing usernames are skipped, malformed
    /// lines are counted and skipped, and blank lines are ignored. The batch
    /// runs in one transaction, so only a storage failure rolls it back.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a statement fails.
    pub fn import_legacy_credentials<I, S>(
        &mut self,
        lines: I,
    ) -> Result<ImportReport, PersistenceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let report: ImportReport = self
            .store
            .conn
            .transaction::<_, PersistenceError, _>(|conn| {
                let mut report: ImportReport = ImportReport::default();

                for (index, line) in lines.into_iter().enumerate() {
                    let line: &str = line.as_ref();
                    if line.trim().is_empty() {
                        continue;
                    }

                    let Some((username, password_hash)) = parse_legacy_line(line) else {
                        report.malformed += 1;
                        report.malformed_lines.push(index + 1);
                        continue;
                    };

                    if insert_user_if_absent(conn, username, password_hash)? {
                        report.imported += 1;
                    } else {
                        report.skipped_duplicates += 1;
                    }
                }

                Ok(report)
            })?;

        if report.malformed > 0 {
            warn!(
                malformed = report.malformed,
                lines = ?report.malformed_lines,
                "Skipped malformed legacy credential lines"
            );
        }
        info!(
            imported = report.imported,
            skipped_duplicates = report.skipped_duplicates,
            "Legacy credential import complete"
        );

        Ok(report)
    }

    /// Imports a legacy credential file from `path`.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if `path` does not exist, `StorageIo` if it
    /// cannot be read, or a storage error.
    pub fn import_legacy_credentials_file(
        &mut self,
        path: &Path,
    ) -> Result<ImportReport, PersistenceError> {
        let reader = BufReader::new(open_source(path)?);
        let lines: Vec<String> = reader
            .lines()
            .collect::<Result<_, _>>()
            .map_err(|e| PersistenceError::StorageIo(format!("Cannot read {}: {e}", path.display())))?;

        info!(path = %path.display(), lines = lines.len(), "Importing legacy credentials");
        self.import_legacy_credentials(lines)
    }

    /// Looks up a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns a storage error, or `CorruptRecord` if the stored role is unknown.
    pub fn find_by_username(&mut self, username: &str) -> Result<Option<User>, PersistenceError> {
        find_user_by_username(&mut self.store.conn, username)?
            .map(User::try_from)
            .transpose()
    }

    /// Lists all users ordered by username.
    ///
    /// # Errors
    ///
    /// Returns a storage error, or `CorruptRecord` if a stored role is unknown.
    pub fn list(&mut self) -> Result<Vec<User>, PersistenceError> {
        list_users(&mut self.store.conn)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    /// Counts user accounts.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn count(&mut self) -> Result<usize, PersistenceError> {
        count_users(&mut self.store.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::parse_legacy_line;

    #[test]
    fn test_parse_legacy_line() {
        assert_eq!(
            parse_legacy_line("alice,$2b$04$hash"),
            Some(("alice", "$2b$04$hash"))
        );
        assert_eq!(parse_legacy_line(" bob , hash "), Some(("bob", "hash")));
    }

    #[test]
    fn test_parse_legacy_line_rejects_wrong_field_count() {
        assert_eq!(parse_legacy_line("alice"), None);
        assert_eq!(parse_legacy_line("alice hash"), None);
        assert_eq!(parse_legacy_line("alice,hash,extra"), None);
        assert_eq!(parse_legacy_line(",hash"), None);
        assert_eq!(parse_legacy_line("alice,"), None);
    }
}
