//! Database schema bootstrap.
//!
//! Every table, including the migration ledger, comes from
//! [`run_migrations`] so fresh and existing databases end up with the same
//! shape.

use super::migrations::run_migrations;
use rusqlite::{Connection, Result};

/// Apply connection pragmas and all pending migrations.
///
/// Timestamps are stored as INTEGER (Unix milliseconds).
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;

    run_migrations(conn)
}
