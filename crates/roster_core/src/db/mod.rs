//! Snapshot database: connection setup and schema upgrades.
//!
//! The contact list is persisted as a snapshot. Every save deletes and
//! rewrites all rows, so an upgrade only has to reshape the current rows,
//! never replay history. Upgrades are forward-only steps keyed on
//! `PRAGMA user_version`.
//!
//! # Invariants
//! - `open_db`/`open_db_in_memory` hand out connections at
//!   `migrations::latest_version()` and nothing else.
//! - A file written by a newer build is refused. Opening it would let the
//!   next snapshot save drop columns this build does not know about.
//! - A failed upgrade leaves the file at the version it had before.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::{latest_version, schema_version};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File schema is ahead of every step this build ships.
    SchemaTooNew { found: u32, supported: u32 },
    /// One upgrade step failed; the whole upgrade was rolled back.
    UpgradeFailed {
        version: u32,
        step: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "contact snapshot schema v{found} is newer than this build supports (v{supported})"
            ),
            Self::UpgradeFailed {
                version,
                step,
                source,
            } => write!(
                f,
                "contact snapshot upgrade to v{version} ({step}) failed: {source}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::UpgradeFailed { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
