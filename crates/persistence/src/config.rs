// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the file-backed store, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "DATA/intelligence_platform.db";

/// Default time a writer waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the backing store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// A single `SQLite` file, created on first use.
    File(PathBuf),
    /// A private in-memory database. Every open gets a fresh one.
    InMemory,
}

/// Settings used when opening a [`crate::Store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
    /// How long a statement waits for a competing writer's lock.
    pub busy_timeout: Duration,
    /// bcrypt cost factor used when hashing new passwords.
    pub hash_cost: u32,
}

impl StoreConfig {
    /// Configuration for a file-backed store at `path`.
    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::File(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Configuration for an isolated in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    #[must_use]
    pub const fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: StoreLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}
