use rusqlite::Connection;
use studydash_core::db::migrations::latest_version;
use studydash_core::db::open_db_in_memory;
use studydash_core::{KvStore, SqliteKvStore, StoreError};

#[test]
fn set_get_overwrite_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(store.get("theme"), None);
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("dark"));

    store.set("theme", "light").unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("light"));

    store.delete("theme").unwrap();
    store.delete("theme").unwrap();
    assert_eq!(store.get("theme"), None);
}

#[test]
fn slots_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteKvStore::try_new(&conn).unwrap();

    store.set("notes", "chapter 4").unwrap();
    store.set("pomodoroTime", "900").unwrap();
    store.delete("notes").unwrap();

    assert_eq!(store.get("pomodoroTime").as_deref(), Some("900"));
}

#[test]
fn rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn rejects_connection_without_slot_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteKvStore::try_new(&conn),
        Err(StoreError::MissingRequiredTable("kv_slots"))
    ));
}

#[test]
fn read_failure_degrades_to_absence() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE kv_slots;").unwrap();

    assert_eq!(store.get("tasks"), None);
}
