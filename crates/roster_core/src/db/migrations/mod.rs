//! Ordered upgrade steps for the contact snapshot schema.
//!
//! Step `n` moves a file from `user_version = n - 1` to `n`. All steps a
//! file still needs run in one transaction and `user_version` is bumped
//! inside it, so an interrupted upgrade leaves the old version in place.
//! Steps are never edited once released; a schema change ships as a new
//! step appended to `STEPS`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "snapshot_tables",
    sql: include_str!("0001_init.sql"),
}];

/// Version a file reaches once every known step has run.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version recorded in the file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Schema versions before and after one upgrade run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaUpgrade {
    pub from: u32,
    pub to: u32,
}

impl SchemaUpgrade {
    /// True when the file was already current.
    pub fn is_noop(self) -> bool {
        self.from == self.to
    }
}

fn pending_steps(version: u32) -> &'static [SchemaStep] {
    match STEPS.iter().position(|step| step.version > version) {
        Some(start) => &STEPS[start..],
        None => &[],
    }
}

/// Brings the file up to `latest_version()`.
///
/// # Errors
/// - `SchemaTooNew` when the file is ahead of this build.
/// - `UpgradeFailed` naming the first step that did not apply.
pub(crate) fn upgrade_schema(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    let from = schema_version(conn)?;
    let supported = latest_version();
    if from > supported {
        return Err(DbError::SchemaTooNew {
            found: from,
            supported,
        });
    }

    let pending = pending_steps(from);
    if pending.is_empty() {
        return Ok(SchemaUpgrade { from, to: from });
    }

    let tx = conn.transaction()?;
    for step in pending {
        let fail = |source| DbError::UpgradeFailed {
            version: step.version,
            step: step.name,
            source,
        };
        tx.execute_batch(step.sql).map_err(fail)?;
        tx.pragma_update(None, "user_version", step.version)
            .map_err(fail)?;
        info!(
            "event=schema_upgrade module=db status=ok version={} step={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    Ok(SchemaUpgrade {
        from,
        to: supported,
    })
}
