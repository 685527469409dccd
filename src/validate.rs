//! Input validation for todo writes.
//!
//! Every write path (HTTP bodies and CLI arguments) goes through these
//! functions before touching storage. Failures are collected per field so
//! a caller sees every problem at once, not just the first.

use crate::model::{NewTodo, TodoChanges, TodoStatus};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 255;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_STRING: &str = "Not a valid string.";
pub const MSG_NOT_OBJECT: &str = "Invalid data. Expected a dictionary.";

/// Key used for errors that don't belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

// ── Field errors ─────────────────────────────────────────────

/// Validation messages keyed by field name.
///
/// Serializes as a plain object: `{"title": ["This field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Whether the given field has any errors.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Keep the outcome of a field check, recording the failure if any.
    fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

// ── Scalar rules ─────────────────────────────────────────────

/// Trim a title and check it is non-blank and within the length limit.
pub fn validate_title(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MSG_BLANK.to_string());
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(format!(
            "Ensure this field has no more than {TITLE_MAX_CHARS} characters."
        ));
    }
    Ok(trimmed.to_string())
}

/// Parse a status, rejecting anything outside the fixed choices.
pub fn parse_status(raw: &str) -> Result<TodoStatus, String> {
    TodoStatus::parse(raw).ok_or_else(|| invalid_choice(raw))
}

fn invalid_choice(raw: &str) -> String {
    format!("\"{raw}\" is not a valid choice.")
}

fn title_from_value(value: &Value) -> Result<String, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::String(s) => validate_title(s),
        Value::Number(n) => validate_title(&n.to_string()),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(MSG_NOT_STRING.to_string()),
    }
}

fn status_from_value(value: &Value) -> Result<TodoStatus, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::String(s) => parse_status(s),
        other => Err(invalid_choice(&other.to_string())),
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    body.as_object()
        .ok_or_else(|| FieldErrors::single(NON_FIELD_ERRORS, MSG_NOT_OBJECT))
}

// ── Request bodies ───────────────────────────────────────────

/// Validate a create body. `title` is required; `status` defaults to
/// `incomplete`. Read-only fields (`id`, `created_at`) are ignored.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_create(body: &Value) -> Result<NewTodo, FieldErrors> {
    let fields = as_object(body)?;
    let mut errors = FieldErrors::default();

    let title = match fields.get("title") {
        Some(value) => errors.check("title", title_from_value(value)),
        None => {
            errors.add("title", MSG_REQUIRED);
            None
        }
    };
    let status = match fields.get("status") {
        Some(value) => errors.check("status", status_from_value(value)),
        None => Some(TodoStatus::default()),
    };

    match (title, status) {
        (Some(title), Some(status)) if errors.is_empty() => Ok(NewTodo { title, status }),
        _ => Err(errors),
    }
}

/// Validate an update body.
///
/// A full update (`partial == false`) requires `title`; an omitted
/// `status` keeps its stored value. A partial update requires nothing.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_update(body: &Value, partial: bool) -> Result<TodoChanges, FieldErrors> {
    let fields = as_object(body)?;
    let mut errors = FieldErrors::default();

    let title = match fields.get("title") {
        Some(value) => errors.check("title", title_from_value(value)),
        None => {
            if !partial {
                errors.add("title", MSG_REQUIRED);
            }
            None
        }
    };
    let status = fields
        .get("status")
        .and_then(|value| errors.check("status", status_from_value(value)));

    if errors.is_empty() {
        Ok(TodoChanges { title, status })
    } else {
        Err(errors)
    }
}

// ── CLI arguments ────────────────────────────────────────────

/// Validate create arguments given as plain strings.
///
/// # Errors
///
/// Returns every field error found.
pub fn new_todo_from_args(title: &str, status: Option<&str>) -> Result<NewTodo, FieldErrors> {
    let mut errors = FieldErrors::default();
    let title = errors.check("title", validate_title(title));
    let status = match status {
        Some(raw) => errors.check("status", parse_status(raw)),
        None => Some(TodoStatus::default()),
    };

    match (title, status) {
        (Some(title), Some(status)) => Ok(NewTodo { title, status }),
        _ => Err(errors),
    }
}

/// Validate update arguments given as plain strings.
///
/// # Errors
///
/// Returns every field error found.
pub fn changes_from_args(
    title: Option<&str>,
    status: Option<&str>,
) -> Result<TodoChanges, FieldErrors> {
    let mut errors = FieldErrors::default();
    let title = title.and_then(|raw| errors.check("title", validate_title(raw)));
    let status = status.and_then(|raw| errors.check("status", parse_status(raw)));

    if errors.is_empty() {
        Ok(TodoChanges { title, status })
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults_status() {
        let todo = validate_create(&json!({"title": "buy milk"})).unwrap();
        assert_eq!(todo.title, "buy milk");
        assert_eq!(todo.status, TodoStatus::Incomplete);
    }

    #[test]
    fn test_create_requires_title() {
        let errors = validate_create(&json!({"status": "complete"})).unwrap_err();
        assert_eq!(errors.get("title"), Some(&[MSG_REQUIRED.to_string()][..]));
        assert!(!errors.contains("status"));
    }

    #[test]
    fn test_create_rejects_blank_and_null_titles() {
        let errors = validate_create(&json!({"title": ""})).unwrap_err();
        assert_eq!(errors.get("title").unwrap()[0], MSG_BLANK);

        let errors = validate_create(&json!({"title": "   "})).unwrap_err();
        assert_eq!(errors.get("title").unwrap()[0], MSG_BLANK);

        let errors = validate_create(&json!({"title": null})).unwrap_err();
        assert_eq!(errors.get("title").unwrap()[0], MSG_NULL);
    }

    #[test]
    fn test_title_length_boundary() {
        let max = "a".repeat(TITLE_MAX_CHARS);
        assert_eq!(validate_title(&max).unwrap().len(), TITLE_MAX_CHARS);

        let over = "a".repeat(TITLE_MAX_CHARS + 1);
        assert_eq!(
            validate_title(&over).unwrap_err(),
            "Ensure this field has no more than 255 characters."
        );

        // Counted in characters, not bytes
        let wide = "é".repeat(TITLE_MAX_CHARS);
        assert!(validate_title(&wide).is_ok());
    }

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(validate_title("  buy milk \n").unwrap(), "buy milk");
    }

    #[test]
    fn test_title_type_coercion() {
        let todo = validate_create(&json!({"title": 42})).unwrap();
        assert_eq!(todo.title, "42");

        let errors = validate_create(&json!({"title": ["a"]})).unwrap_err();
        assert_eq!(errors.get("title").unwrap()[0], MSG_NOT_STRING);
    }

    #[test]
    fn test_invalid_status_choice() {
        let errors = validate_create(&json!({"title": "x", "status": "done"})).unwrap_err();
        assert_eq!(
            errors.get("status").unwrap()[0],
            "\"done\" is not a valid choice."
        );

        let errors = validate_update(&json!({"status": 1}), true).unwrap_err();
        assert_eq!(errors.get("status").unwrap()[0], "\"1\" is not a valid choice.");
    }

    #[test]
    fn test_collects_all_field_errors() {
        let errors = validate_create(&json!({"status": "bogus"})).unwrap_err();
        assert!(errors.contains("title"));
        assert!(errors.contains("status"));
        assert_eq!(
            errors.to_string(),
            "status: \"bogus\" is not a valid choice.; title: This field is required."
        );
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate_create(&json!(["title"])).unwrap_err();
        assert_eq!(errors.get(NON_FIELD_ERRORS).unwrap()[0], MSG_NOT_OBJECT);
    }

    #[test]
    fn test_read_only_fields_ignored() {
        let todo =
            validate_create(&json!({"title": "x", "id": 99, "created_at": "yesterday"})).unwrap();
        assert_eq!(todo.title, "x");
    }

    #[test]
    fn test_full_update_requires_title() {
        let errors = validate_update(&json!({"status": "complete"}), false).unwrap_err();
        assert!(errors.contains("title"));

        let changes = validate_update(&json!({"title": "y"}), false).unwrap();
        assert_eq!(changes.title.as_deref(), Some("y"));
        assert_eq!(changes.status, None);
    }

    #[test]
    fn test_partial_update_accepts_subset() {
        let changes = validate_update(&json!({"status": "complete"}), true).unwrap();
        assert_eq!(changes.title, None);
        assert_eq!(changes.status, Some(TodoStatus::Complete));

        assert!(validate_update(&json!({}), true).unwrap().is_empty());
    }

    #[test]
    fn test_args_validation() {
        let todo = new_todo_from_args("walk dog", Some("complete")).unwrap();
        assert_eq!(todo.status, TodoStatus::Complete);

        let errors = new_todo_from_args("", Some("nope")).unwrap_err();
        assert!(errors.contains("title"));
        assert!(errors.contains("status"));

        let changes = changes_from_args(None, Some("incomplete")).unwrap();
        assert_eq!(changes.status, Some(TodoStatus::Incomplete));
        assert!(changes_from_args(Some(" "), None).is_err());
    }
}
