//! Configuration management.
//!
//! Resolves where the todo database lives and where the HTTP server binds.
//! Command-line flags win over environment variables, which win over the
//! defaults below.
//!
//! # Layout
//!
//! - **Database**: `~/.todos/data/todos.db`
//! - **Test database**: `~/.todos/test/todos.db` when `TODOS_TEST_DB` is set

use crate::error::{Error, Result};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

/// Default bind host for `todos serve`.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port for `todos serve`.
pub const DEFAULT_PORT: u16 = 8000;

/// Get the global Todos directory location (`~/.todos/`).
#[must_use]
pub fn global_todos_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".todos"))
}

/// Check if test mode is enabled.
///
/// Test mode is enabled by setting `TODOS_TEST_DB=1` (or any non-empty
/// value other than `0`/`false`).
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var("TODOS_TEST_DB").is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// Get the test database path.
#[must_use]
pub fn test_db_path() -> Option<PathBuf> {
    global_todos_dir().map(|dir| dir.join("test").join("todos.db"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. `explicit_path` (the `--db` flag, which also reads `TODOS_DB`)
/// 2. `TODOS_TEST_DB` → isolated test database
/// 3. Global location: `~/.todos/data/todos.db`
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if is_test_mode() {
        return test_db_path();
    }

    global_todos_dir().map(|dir| dir.join("data").join("todos.db"))
}

/// Like [`resolve_db_path`], but fails when no home directory is known.
///
/// # Errors
///
/// Returns [`Error::Config`] if no database location can be determined.
pub fn require_db_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    resolve_db_path(explicit_path)
        .ok_or_else(|| Error::Config("could not determine a database location".to_string()))
}

/// Resolve the server bind address from host and port.
///
/// # Errors
///
/// Returns [`Error::Config`] if the host does not resolve.
pub fn resolve_bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()
        .map_err(|e| Error::Config(format!("invalid bind address {host}:{port}: {e}")))?
        .next()
        .ok_or_else(|| Error::Config(format!("bind address {host}:{port} did not resolve")))
}
