use chrono::NaiveDate;
use todoz::config::Config;
use todoz::error::TodoError;
use todoz::model::Priority;
use todoz::service::{TodoService, TodoUpdate};
use todoz::store::TodoStore;

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        storage_dir: dir.join("storage"),
        summary_file: dir.join("save_todos.json"),
        ..Config::default()
    }
}

#[test]
fn test_service_round_trip_on_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = config_in(temp_dir.path());
    config.ensure_storage_dir().unwrap();
    let file = config.full_path("todos.json");

    let mut service = TodoService::new(&file, config.clone()).unwrap();
    let first = service
        .create_todo("Buy milk", "2025-03-01", "", "", "home")
        .unwrap();
    let second = service
        .create_todo("Pay rent", "2025-03-05", "no", "HIGH", "")
        .unwrap();
    service
        .update_todo(&first.id, &TodoUpdate::new().completed("yes"))
        .unwrap();
    service.save().unwrap();

    let reopened = TodoService::new(&file, config).unwrap();
    let todos = reopened.list_todos();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].id, first.id);
    assert!(todos[0].completed);
    assert_eq!(todos[0].labels, vec!["home"]);
    assert_eq!(todos[1].id, second.id);
    assert_eq!(todos[1].priority, Priority::High);
    assert_eq!(
        todos[1].due_date,
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    );
}

#[test]
fn test_reads_existing_file_layout() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("todos.json");
    std::fs::write(
        &file,
        r#"{
 "aB3dE9": {
  "id": "aB3dE9",
  "task": "Renew passport",
  "labels": null,
  "completed": false,
  "due_date": "2025-09-01T00:00:00Z",
  "priority": "MEDIUM",
  "created_at": "2025-01-02T10:00:00.123456789+01:00",
  "updated_at": "2025-01-02T10:00:00.123456789+01:00"
 }
}"#,
    )
    .unwrap();

    let store = TodoStore::open(&file, 0o644).unwrap();
    let todo = store.get("aB3dE9").unwrap();
    assert_eq!(todo.task, "Renew passport");
    assert!(todo.labels.is_empty());
    assert_eq!(todo.priority, Priority::Medium);
    assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
}

#[test]
fn test_missing_file_is_empty_store() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = TodoStore::open(temp_dir.path().join("nope.json"), 0o644).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_corrupt_file_fails_to_open() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("todos.json");
    std::fs::write(&file, "{ not json").unwrap();

    let err = TodoStore::open(&file, 0o644).err().unwrap();
    assert!(err.to_string().contains("failed to parse stored todos"));
}

#[test]
fn test_summary_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = config_in(temp_dir.path());
    config.ensure_storage_dir().unwrap();
    let file = config.full_path("todos.json");

    let mut service = TodoService::new(&file, config.clone()).unwrap();
    service
        .create_todo(" Walk the dog ", "2025-03-01", "", "", "")
        .unwrap();
    service.save().unwrap();
    let first = std::fs::read_to_string(&config.summary_file).unwrap();

    service.save().unwrap();
    let second = std::fs::read_to_string(&config.summary_file).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(
        value[file.display().to_string()],
        serde_json::json!(["Walk the dog"])
    );
}

#[cfg(unix)]
#[test]
fn test_save_applies_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config {
        file_mode: 0o600,
        ..config_in(temp_dir.path())
    };
    config.ensure_storage_dir().unwrap();
    let file = config.full_path("todos.json");

    let mut service = TodoService::new(&file, config).unwrap();
    service
        .create_todo("Lock it down", "2025-01-01", "", "", "")
        .unwrap();
    service.save().unwrap();

    let mode = std::fs::metadata(&file).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_invalid_utf8_is_a_parse_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("todos.json");
    std::fs::write(&file, b"{\"a\xff\": 1}").unwrap();

    let err = TodoStore::open(&file, 0o644).err().unwrap();
    assert!(matches!(err, TodoError::Deserialization(_)));
}

#[test]
fn test_null_file_is_empty_store() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("todos.json");
    std::fs::write(&file, "null").unwrap();

    let store = TodoStore::open(&file, 0o644).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_record_key_must_match_id() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = config_in(temp_dir.path());
    config.ensure_storage_dir().unwrap();
    let file = config.full_path("todos.json");
    std::fs::write(
        &file,
        r#"{
 "k1": {
  "id": "a1",
  "task": "Renew passport",
  "labels": [],
  "completed": false,
  "due_date": "2025-09-01T00:00:00Z",
  "priority": "LOW",
  "created_at": "2025-01-02T10:00:00Z",
  "updated_at": "2025-01-02T10:00:00Z"
 }
}"#,
    )
    .unwrap();

    let err = TodoService::new(&file, config).err().unwrap();
    assert!(matches!(err, TodoError::Deserialization(_)));
    assert!(err.to_string().contains("does not match its id"));
}
