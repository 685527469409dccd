//! SQLite storage implementation.
//!
//! All writes go through [`SqliteStorage::mutate`], which wraps the
//! operation in an IMMEDIATE transaction.

use crate::error::{Error, Result};
use crate::model::{NewTodo, Todo, TodoChanges, TodoStatus};
use crate::storage::schema::apply_schema;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const TODO_COLUMNS: &str = "id, title, status, created_at";

/// How long a write waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the parent directory, the database and the schema if they
    /// don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        apply_schema(&conn)?;
        debug!(path = %path.display(), "Opened todo database");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute a mutation inside an IMMEDIATE transaction.
    ///
    /// Commits when the closure succeeds; the transaction is rolled back
    /// on drop when it returns an error.
    ///
    /// # Errors
    ///
    /// Returns the closure's error or any transaction error.
    pub fn mutate<F, R>(&mut self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        let result = f(&tx)?;
        tx.commit()?;

        debug!(op, "Mutation committed");
        Ok(result)
    }

    // ==================
    // Todo Operations
    // ==================

    /// Insert a todo and return it with its assigned id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_todo(&mut self, new: &NewTodo) -> Result<Todo> {
        self.mutate("create_todo", |tx| {
            let now = chrono::Utc::now().timestamp_millis();
            tx.execute(
                "INSERT INTO todos (title, status, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![new.title, new.status.as_str(), now],
            )?;

            Ok(Todo {
                id: tx.last_insert_rowid(),
                title: new.title.clone(),
                status: new.status,
                created_at: now,
            })
        })
    }

    /// Get a todo by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_todo(&self, id: i64) -> Result<Option<Todo>> {
        let todo = self
            .conn
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                [id],
                map_todo_row,
            )
            .optional()?;
        Ok(todo)
    }

    /// List all todos, newest first.
    ///
    /// Todos created in the same millisecond are ordered by id, so the
    /// later insert still comes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_todos(&self) -> Result<Vec<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
        ))?;

        let todos = stmt
            .query_map([], map_todo_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(todos)
    }

    /// Apply field changes to a todo and return the stored result.
    ///
    /// An empty change set is a no-op that still checks the todo exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TodoNotFound`] if no todo has this id.
    pub fn update_todo(&mut self, id: i64, changes: &TodoChanges) -> Result<Todo> {
        self.mutate("update_todo", |tx| {
            let mut updates: Vec<String> = Vec::new();
            let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if let Some(title) = &changes.title {
                params.push(Box::new(title.clone()));
                updates.push(format!("title = ?{}", params.len()));
            }

            if let Some(status) = changes.status {
                params.push(Box::new(status.as_str()));
                updates.push(format!("status = ?{}", params.len()));
            }

            if !updates.is_empty() {
                params.push(Box::new(id));
                let sql = format!(
                    "UPDATE todos SET {} WHERE id = ?{}",
                    updates.join(", "),
                    params.len()
                );

                let param_refs: Vec<&dyn rusqlite::ToSql> =
                    params.iter().map(AsRef::as_ref).collect();
                let affected = tx.execute(&sql, param_refs.as_slice())?;

                if affected == 0 {
                    return Err(Error::not_found(id));
                }
            }

            tx.query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                [id],
                map_todo_row,
            )
            .optional()?
            .ok_or_else(|| Error::not_found(id))
        })
    }

    /// Delete a todo.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TodoNotFound`] if no todo has this id, including when
    /// it was already deleted.
    pub fn delete_todo(&mut self, id: i64) -> Result<()> {
        self.mutate("delete_todo", |tx| {
            let affected = tx.execute("DELETE FROM todos WHERE id = ?1", [id])?;

            if affected == 0 {
                return Err(Error::not_found(id));
            }
            Ok(())
        })
    }

    #[cfg(test)]
    fn count_todos(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

// Helper to map todo rows
fn map_todo_row(row: &rusqlite::Row) -> rusqlite::Result<Todo> {
    let status_str: String = row.get(2)?;
    let status = TodoStatus::parse(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown todo status: {status_str}").into(),
        )
    })?;

    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        status,
        created_at: row.get(3)?,
    })
}
