//! Todo model.
//!
//! A todo is the only persisted entity: a title, a two-state status, and
//! an immutable creation timestamp.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Todo status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    #[default]
    Incomplete,
    Complete,
}

impl TodoStatus {
    /// Every valid status, in display order.
    pub const ALL: [Self; 2] = [Self::Incomplete, Self::Complete];

    /// Get the string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
        }
    }

    /// Parse an exact status string.
    ///
    /// Matching is case-sensitive; anything else is not a valid choice.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Surrogate identifier assigned by the store
    pub id: i64,

    /// Title, 1-255 characters
    pub title: String,

    /// Completion status
    pub status: TodoStatus,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

/// Validated input for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub status: TodoStatus,
}

impl NewTodo {
    /// A new incomplete todo with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: TodoStatus::default(),
        }
    }

    /// Set the initial status.
    #[must_use]
    pub fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = status;
        self
    }
}

/// Validated field changes for an update. `None` leaves a field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub status: Option<TodoStatus>,
}

impl TodoChanges {
    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none()
    }
}

/// Wire representation of a todo, shared by the HTTP API and `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoOutput {
    pub id: i64,
    pub title: String,
    pub status: TodoStatus,
    pub created_at: String,
}

impl From<Todo> for TodoOutput {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            status: t.status,
            created_at: format_timestamp(t.created_at),
        }
    }
}

/// Render a Unix-millisecond timestamp as RFC 3339 UTC.
#[must_use]
pub fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ts)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_else(|| ts.to_string())
}
