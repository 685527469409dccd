//! Todo store commands.
//!
//! - `todos create <title> [--status <status>]` - Create a todo
//! - `todos list` - List todos, newest first
//! - `todos show <id>` - Show one todo
//! - `todos update <id> [--title <title>] [--status <status>]` - Update a todo
//! - `todos delete <id>` - Delete a todo

use crate::cli::{CreateArgs, UpdateArgs};
use crate::config::require_db_path;
use crate::error::{Error, Result};
use crate::model::{Todo, TodoOutput, TodoStatus, format_timestamp};
use crate::storage::SqliteStorage;
use crate::validate;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct TodoListOutput {
    todos: Vec<TodoOutput>,
    count: usize,
}

#[derive(Serialize)]
struct DeleteOutput {
    deleted: bool,
    id: i64,
}

fn open_storage(db_path: Option<&Path>) -> Result<SqliteStorage> {
    let db_path = require_db_path(db_path)?;
    SqliteStorage::open(&db_path)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn status_marker(status: TodoStatus) -> String {
    match status {
        TodoStatus::Complete => "[x]".green().to_string(),
        TodoStatus::Incomplete => "[ ]".to_string(),
    }
}

fn print_todo_line(todo: &Todo) {
    println!(
        "  {} {} {}",
        status_marker(todo.status),
        format!("#{}", todo.id).dimmed(),
        todo.title
    );
}

/// Execute `todos create`.
///
/// # Errors
///
/// Returns a validation error for a bad title or status, or a storage error.
pub fn execute_create(args: &CreateArgs, db_path: Option<&Path>, json: bool) -> Result<()> {
    let new = validate::new_todo_from_args(&args.title, args.status.as_deref())?;
    let mut storage = open_storage(db_path)?;
    let todo = storage.create_todo(&new)?;

    if json {
        return print_json(&TodoOutput::from(todo));
    }

    println!("Created todo #{}", todo.id);
    print_todo_line(&todo);
    Ok(())
}

/// Execute `todos list`.
///
/// # Errors
///
/// Returns an error if the database cannot be read.
pub fn execute_list(db_path: Option<&Path>, json: bool) -> Result<()> {
    let storage = open_storage(db_path)?;
    let todos = storage.list_todos()?;

    if json {
        return print_json(&TodoListOutput {
            count: todos.len(),
            todos: todos.into_iter().map(TodoOutput::from).collect(),
        });
    }

    if todos.is_empty() {
        println!("No todos found.");
        println!("\nCreate one with: todos create \"<title>\"");
        return Ok(());
    }

    let done = todos
        .iter()
        .filter(|t| t.status == TodoStatus::Complete)
        .count();
    println!("{} ({done}/{} complete):\n", "Todos".bold(), todos.len());
    for todo in &todos {
        print_todo_line(todo);
    }
    Ok(())
}

/// Execute `todos show`.
///
/// # Errors
///
/// Returns [`Error::TodoNotFound`] if no todo has this id.
pub fn execute_show(id: i64, db_path: Option<&Path>, json: bool) -> Result<()> {
    let storage = open_storage(db_path)?;
    let todo = storage.get_todo(id)?.ok_or_else(|| Error::not_found(id))?;

    if json {
        return print_json(&TodoOutput::from(todo));
    }

    println!("Todo #{}: {}", todo.id, todo.title.bold());
    println!("  Status:  {}", todo.status);
    println!("  Created: {}", format_timestamp(todo.created_at));
    Ok(())
}

/// Execute `todos update`.
///
/// # Errors
///
/// Returns a validation error, [`Error::TodoNotFound`], or a storage error.
pub fn execute_update(args: &UpdateArgs, db_path: Option<&Path>, json: bool) -> Result<()> {
    let changes = validate::changes_from_args(args.title.as_deref(), args.status.as_deref())?;
    let mut storage = open_storage(db_path)?;
    let todo = storage.update_todo(args.id, &changes)?;

    if json {
        return print_json(&TodoOutput::from(todo));
    }

    if changes.is_empty() {
        println!("Nothing to update for todo #{}", todo.id);
    } else {
        println!("Updated todo #{}", todo.id);
    }
    print_todo_line(&todo);
    Ok(())
}

/// Execute `todos delete`.
///
/// # Errors
///
/// Returns [`Error::TodoNotFound`] if no todo has this id.
pub fn execute_delete(id: i64, db_path: Option<&Path>, json: bool) -> Result<()> {
    let mut storage = open_storage(db_path)?;
    storage.delete_todo(id)?;

    if json {
        return print_json(&DeleteOutput { deleted: true, id });
    }

    println!("Deleted todo #{id}");
    Ok(())
}
