//! SQLite storage layer for Todos.
//!
//! # Submodules
//!
//! - [`migrations`] - Embedded, versioned schema migrations
//! - [`schema`] - Pragmas and schema bootstrap
//! - [`sqlite`] - Main SQLite storage implementation

pub mod migrations;
pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStorage;
