// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod aggregate_tests;
mod import_tests;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use intel_platform_domain::NewIncident;

use crate::{Store, StoreConfig};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A password that satisfies the policy.
pub const VALID_PASSWORD: &str = "Valid1!";

/// Config for an isolated in-memory store with the cheapest bcrypt cost.
pub fn test_config() -> StoreConfig {
    StoreConfig::in_memory().with_hash_cost(crate::MIN_HASH_COST)
}

pub fn test_store() -> Store {
    Store::open(&test_config()).expect("In-memory store should open")
}

/// Config for a file store at `path` with the cheapest bcrypt cost.
pub fn test_file_config(path: &std::path::Path) -> StoreConfig {
    StoreConfig::file(path).with_hash_cost(crate::MIN_HASH_COST)
}

/// Returns a path under the temp directory that no other test uses.
pub fn unique_temp_path(name: &str) -> PathBuf {
    let n: u64 = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "intel_platform_test_{}_{n}_{name}",
        std::process::id()
    ))
}

/// Writes `contents` to a fresh temp file and returns its path.
pub fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let path: PathBuf = unique_temp_path(name);
    std::fs::write(&path, contents).expect("Temp file should be writable");
    path
}

/// Removes a database file and its WAL side files.
pub fn remove_database_files(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(file));
    }
}

pub fn create_test_incident(
    timestamp: &str,
    severity: &str,
    category: &str,
    status: &str,
) -> NewIncident {
    NewIncident::parse(timestamp, severity, category, status, None, None)
        .expect("Test incident should be valid")
}
