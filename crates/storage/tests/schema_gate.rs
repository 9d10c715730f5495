use rusqlite::{Connection, params};
use sl_storage::{ErrorKind, SqliteStore, StoreConfig, StoreError};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_storage_dir(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic enough for tests")
        .as_nanos();
    path.push(format!(
        "sl-storage-schema-{label}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&path).expect("temp storage dir must be creatable");
    path
}

#[test]
fn open_is_fail_closed_on_foreign_tables() {
    let dir = temp_storage_dir("foreign");
    let conn = Connection::open(dir.join("storyledger.db")).expect("raw db must open");
    conn.execute("CREATE TABLE legacy_assets(id INTEGER PRIMARY KEY)", [])
        .expect("legacy table should be created");
    drop(conn);

    let err = SqliteStore::open(&dir).expect_err("foreign schema must be rejected");
    assert_eq!(err.code(), "RESET_REQUIRED");
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(matches!(
        err,
        StoreError::InvalidInput(message) if message.starts_with("RESET_REQUIRED")
    ));
}

#[test]
fn open_is_fail_closed_on_schema_version_drift() {
    let dir = temp_storage_dir("drift");
    drop(SqliteStore::open(&dir).expect("fresh storage should open"));

    let conn = Connection::open(dir.join("storyledger.db")).expect("raw db must open");
    conn.execute(
        "UPDATE store_state SET schema_version=?1 WHERE singleton=1",
        params![99_i64],
    )
    .expect("version row should update");
    drop(conn);

    let err = SqliteStore::open(&dir).expect_err("unknown schema version must be rejected");
    assert_eq!(err.code(), "RESET_REQUIRED");
}

#[test]
fn reopen_keeps_existing_data() {
    let dir = temp_storage_dir("reopen");
    let parent = sl_core::ids::CollectionId::try_new("storyboard-1").expect("parent id");
    {
        let mut store = SqliteStore::open(&dir).expect("fresh storage should open");
        store
            .sequence_append(sl_storage::AppendItemRequest {
                parent_id: parent.clone(),
                payload: "opening shot".to_string(),
                expected_revision: None,
            })
            .expect("append");
    }

    let store = SqliteStore::open(&dir).expect("existing storage should reopen");
    let items = store.sequence_list(&parent).expect("list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].payload, "opening shot");
    assert_eq!(store.sequence_revision(&parent).expect("revision"), 1);
}

#[test]
fn open_with_config_uses_named_database_file() {
    let dir = temp_storage_dir("config");
    let config = StoreConfig {
        db_file_name: "ledger.sqlite".to_string(),
        busy_timeout_ms: 250,
        ..StoreConfig::with_storage_dir(&dir)
    };
    let store = SqliteStore::open_with_config(config).expect("configured storage should open");
    assert_eq!(store.storage_dir(), dir.as_path());
    assert_eq!(store.config().busy_timeout_ms, 250);
    assert!(dir.join("ledger.sqlite").exists());
    assert!(!dir.join("storyledger.db").exists());

    let conn = Connection::open(dir.join("ledger.sqlite")).expect("raw db must open");
    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .expect("journal mode");
    assert_eq!(mode.to_ascii_lowercase(), "wal");
}

#[test]
fn open_with_config_rejects_invalid_config() {
    let dir = temp_storage_dir("bad-config");
    let config = StoreConfig {
        temp_ordinal_offset: 0,
        ..StoreConfig::with_storage_dir(&dir)
    };
    let err = SqliteStore::open_with_config(config).expect_err("zero offset must be rejected");
    assert_eq!(err.code(), "INVALID_CONFIG");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn open_is_fail_closed_when_one_of_our_tables_is_gone() {
    let dir = temp_storage_dir("missing-table");
    drop(SqliteStore::open(&dir).expect("fresh storage should open"));

    let conn = Connection::open(dir.join("storyledger.db")).expect("raw db must open");
    conn.execute("DROP TABLE current_pointer", [])
        .expect("pointer table should drop");
    drop(conn);

    let err = SqliteStore::open(&dir).expect_err("partial schema must be rejected");
    assert_eq!(err.code(), "RESET_REQUIRED");
}

#[test]
fn open_is_fail_closed_without_a_state_row() {
    let dir = temp_storage_dir("no-state-row");
    drop(SqliteStore::open(&dir).expect("fresh storage should open"));

    let conn = Connection::open(dir.join("storyledger.db")).expect("raw db must open");
    conn.execute("DELETE FROM store_state", [])
        .expect("state row should delete");
    drop(conn);

    let err = SqliteStore::open(&dir).expect_err("missing state row must be rejected");
    assert_eq!(err.code(), "RESET_REQUIRED");
}
