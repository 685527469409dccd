//! Data models for Todos.

pub mod todo;

pub use todo::{NewTodo, Todo, TodoChanges, TodoOutput, TodoStatus, format_timestamp};
