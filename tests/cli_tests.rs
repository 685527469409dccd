use assert_cmd::Command;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn todos() -> Command {
    let mut cmd = Command::cargo_bin("todos").unwrap();
    cmd.env_remove("TODOS_DB").env_remove("RUST_LOG");
    cmd
}

fn todos_json(db: &Path, args: &[&str]) -> Value {
    let output = todos()
        .arg("--db")
        .arg(db)
        .arg("--json")
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "todos {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_repl_add_show_exit() {
    let output = todos()
        .arg("repl")
        .write_stdin("add\nbuy milk\nshow\nexit\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Enter a todo:"));
    assert!(stdout.contains("Buy Milk\n"));
    assert!(stdout.ends_with("Bye!\n"));
}

#[test]
fn test_repl_unknown_command_keeps_running() {
    let output = todos()
        .arg("repl")
        .write_stdin("foo\nexit\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "Type add, show ot exit: You entered an unknown command.\nType add, show ot exit: Bye!\n"
    );
}

#[test]
fn test_repl_closed_stdin_exits_cleanly() {
    let output = todos().arg("repl").write_stdin("").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().ends_with("Bye!\n"));
}

#[test]
fn test_store_commands_roundtrip() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("todos.db");

    let created = todos_json(&db, &["create", "buy milk"]);
    assert_eq!(created["title"], "buy milk");
    assert_eq!(created["status"], "incomplete");
    let id = created["id"].as_i64().unwrap().to_string();

    todos_json(&db, &["create", "walk dog", "--status", "complete"]);

    let list = todos_json(&db, &["list"]);
    assert_eq!(list["count"], 2);
    assert_eq!(list["todos"][0]["title"], "walk dog");
    assert_eq!(list["todos"][1]["title"], "buy milk");

    let updated = todos_json(&db, &["update", &id, "--status", "complete"]);
    assert_eq!(updated["status"], "complete");
    assert_eq!(updated["title"], "buy milk");

    let shown = todos_json(&db, &["show", &id]);
    assert_eq!(shown, updated);

    let deleted = todos_json(&db, &["delete", &id]);
    assert_eq!(deleted["deleted"], true);

    let output = todos()
        .arg("--db")
        .arg(&db)
        .args(["show", &id])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Todo not found"));
}

#[test]
fn test_invalid_status_exits_with_validation_code() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("todos.db");

    let output = todos()
        .arg("--db")
        .arg(&db)
        .arg("--json")
        .args(["create", "x", "--status", "done"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));

    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "VALIDATION_FAILED");
    assert_eq!(err["error"]["fields"]["status"][0], "\"done\" is not a valid choice.");
}

#[test]
fn test_list_empty_human_output() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("todos.db");

    let output = todos()
        .arg("--db")
        .arg(&db)
        .args(["--no-color", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("No todos found."));
}

#[test]
fn test_quiet_suppresses_logs_but_not_results() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("todos.db");

    let verbose = todos()
        .arg("--db")
        .arg(&db)
        .args(["-vv", "--no-color", "create", "buy milk"])
        .output()
        .unwrap();
    assert!(verbose.status.success());
    assert!(String::from_utf8_lossy(&verbose.stderr).contains("Opened todo database"));

    let quiet = todos()
        .arg("--db")
        .arg(&db)
        .args(["-q", "-vv", "--no-color", "list"])
        .output()
        .unwrap();
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty());
    assert!(String::from_utf8(quiet.stdout).unwrap().contains("buy milk"));
}
