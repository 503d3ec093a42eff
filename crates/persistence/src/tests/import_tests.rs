// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Legacy credential import tests.

use std::path::PathBuf;

use intel_platform_domain::{Role, Session};

use super::{VALID_PASSWORD, test_store, unique_temp_path, write_temp_file};
use crate::{ImportReport, PersistenceError, Store};

#[test]
fn test_import_counts_imported_duplicates_and_malformed() {
    let mut store: Store = test_store();
    store
        .users()
        .register("alice", VALID_PASSWORD, Role::Admin)
        .unwrap();

    let legacy_hash: String = store.hasher().hash("Legacy1!").unwrap();
    let lines: Vec<String> = vec![
        format!("carol,{legacy_hash}"),
        format!("alice,{legacy_hash}"),
        String::from("space separated"),
        String::new(),
        format!("dave,{legacy_hash}"),
        String::from("too,many,fields"),
        format!("carol,{legacy_hash}"),
    ];

    let report: ImportReport = store.users().import_legacy_credentials(&lines).unwrap();

    assert_eq!(
        report,
        ImportReport {
            imported: 2,
            skipped_duplicates: 2,
            malformed: 2,
            malformed_lines: vec![3, 6],
        }
    );
    assert_eq!(store.users().count().unwrap(), 3);
}

#[test]
fn test_import_does_not_overwrite_existing_user() {
    let mut store: Store = test_store();
    store
        .users()
        .register("alice", VALID_PASSWORD, Role::Admin)
        .unwrap();

    let other_hash: String = store.hasher().hash("Other2@pass").unwrap();
    store
        .users()
        .import_legacy_credentials([format!("alice,{other_hash}")])
        .unwrap();

    let session: Session = store.users().authenticate("alice", VALID_PASSWORD).unwrap();
    assert_eq!(session.role, Role::Admin);
}

#[test]
fn test_imported_user_can_authenticate_with_default_role() {
    let mut store: Store = test_store();
    let legacy_hash: String = store.hasher().hash("Legacy1!").unwrap();

    store
        .users()
        .import_legacy_credentials([format!("carol,{legacy_hash}")])
        .unwrap();

    let session: Session = store.users().authenticate("carol", "Legacy1!").unwrap();
    assert_eq!(session.role, Role::User);
}

#[test]
fn test_imported_malformed_hash_denies_login() {
    let mut store: Store = test_store();
    store
        .users()
        .import_legacy_credentials(["mallory,not-a-hash"])
        .unwrap();

    let result = store.users().authenticate("mallory", "not-a-hash");
    assert!(matches!(
        result,
        Err(PersistenceError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_import_from_file() {
    let mut store: Store = test_store();
    let legacy_hash: String = store.hasher().hash("Legacy1!").unwrap();
    let path: PathBuf = write_temp_file(
        "users.txt",
        &format!("erin,{legacy_hash}\nfrank,{legacy_hash}\n\nbroken\n"),
    );

    let report: ImportReport = store.users().import_legacy_credentials_file(&path).unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.malformed_lines, vec![4]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_import_missing_file() {
    let mut store: Store = test_store();
    let path: PathBuf = unique_temp_path("missing_users.txt");

    let result = store.users().import_legacy_credentials_file(&path);
    assert_eq!(result, Err(PersistenceError::FileNotFound(path)));
}
