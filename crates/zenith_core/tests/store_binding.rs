//! Integration tests for the SQLite state store and typed bindings.

use rusqlite::Connection;
use zenith_core::db::migrations::latest_version;
use zenith_core::db::{open_db, open_db_in_memory};
use zenith_core::store::{keys, SqliteStateStore, StateStore, StoreBinding, StoreError};

#[test]
fn binding_round_trips_through_sqlite() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let mut store = SqliteStateStore::try_new(&conn).expect("migrated connection should be ready");

    let mut binding = StoreBinding::load(&store, keys::TODOS, Vec::<String>::new())
        .expect("load should succeed");
    binding
        .set(&mut store, vec!["buy milk".to_string()])
        .expect("set should persist");

    let reloaded = StoreBinding::load(&store, keys::TODOS, Vec::<String>::new())
        .expect("reload should succeed");
    assert_eq!(reloaded.get().as_slice(), ["buy milk".to_string()]);
}

#[test]
fn malformed_stored_text_degrades_to_the_default() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let mut store = SqliteStateStore::try_new(&conn).expect("store should be ready");
    store
        .write_raw(keys::ACTIVE_VIEW, "{definitely not json")
        .expect("raw write should succeed");

    let binding = StoreBinding::load(&store, keys::ACTIVE_VIEW, "notes".to_string())
        .expect("load must recover, not fail");
    assert_eq!(binding.get(), "notes");
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().expect("raw connection should open");

    let error = SqliteStateStore::try_new(&conn).expect_err("unmigrated schema must be rejected");
    match error {
        StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        } => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        other => panic!("expected UninitializedConnection, got {other:?}"),
    }
}

#[test]
fn try_new_rejects_missing_state_table() {
    let conn = Connection::open_in_memory().expect("raw connection should open");
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .expect("pragma should apply");

    let error = SqliteStateStore::try_new(&conn).expect_err("missing table must be rejected");
    assert!(matches!(error, StoreError::MissingRequiredTable("app_state")));
}

#[test]
fn try_new_rejects_missing_column() {
    let conn = Connection::open_in_memory().expect("raw connection should open");
    conn.execute_batch(&format!(
        "CREATE TABLE app_state (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .expect("schema setup should apply");

    let error = SqliteStateStore::try_new(&conn).expect_err("missing column must be rejected");
    assert!(matches!(
        error,
        StoreError::MissingRequiredColumn {
            table: "app_state",
            column: "updated_at",
        }
    ));
}

#[test]
fn values_survive_close_and_reopen() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let db_path = dir.path().join("state.db");

    {
        let conn = open_db(&db_path).expect("file db should open");
        let mut store = SqliteStateStore::try_new(&conn).expect("store should be ready");
        store
            .write_raw(keys::SELECTED_FOLDER_ID, "\"abc\"")
            .expect("write should succeed");
    }

    let conn = open_db(&db_path).expect("file db should reopen");
    let store = SqliteStateStore::try_new(&conn).expect("store should be ready after reopen");
    assert_eq!(
        store
            .read_raw(keys::SELECTED_FOLDER_ID)
            .expect("read should succeed"),
        Some("\"abc\"".to_string())
    );
}

#[test]
fn concurrent_writers_are_last_write_wins() {
    let conn = open_db_in_memory().expect("in-memory db should open");

    let mut first = SqliteStateStore::try_new(&conn).expect("first store should be ready");
    let mut second = SqliteStateStore::try_new(&conn).expect("second store should be ready");

    first
        .write_raw(keys::TODOS, "[\"from first\"]")
        .expect("first write should succeed");
    second
        .write_raw(keys::TODOS, "[\"from second\"]")
        .expect("second write should succeed");

    assert_eq!(
        first.read_raw(keys::TODOS).expect("read should succeed"),
        Some("[\"from second\"]".to_string())
    );
}
