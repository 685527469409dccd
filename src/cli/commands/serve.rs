//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::config::{require_db_path, resolve_bind_addr};
use crate::error::Result;
use crate::server;
use crate::storage::SqliteStorage;
use std::path::Path;
use tracing::info;

/// Open the database and serve the HTTP API until interrupted.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the address cannot
/// be bound, or the server stops with an I/O error.
pub fn execute(args: &ServeArgs, db_path: Option<&Path>) -> Result<()> {
    let db_path = require_db_path(db_path)?;
    let addr = resolve_bind_addr(&args.host, args.port)?;
    let storage = SqliteStorage::open(&db_path)?;
    info!(db = %db_path.display(), "Using todo database");

    actix_web::rt::System::new().block_on(server::run(storage, addr, args.workers))
}
