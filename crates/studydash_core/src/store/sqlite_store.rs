//! SQLite-backed slot store.
//!
//! # Invariants
//! - Only migrated connections are accepted (`try_new` checks schema).
//! - One row per slot key; `set` is an upsert.

use super::{KvStore, StoreError, StoreResult};
use crate::db::migrations::{current_user_version, latest_version};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_slots";

/// Slot store over the `kv_slots` table.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by `db::open_db`/`db::open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the slot table is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [KV_TABLE],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(StoreError::MissingRequiredTable(KV_TABLE));
        }

        Ok(Self { conn })
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> Option<String> {
        let result = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional();

        match result {
            Ok(value) => value,
            Err(err) => {
                error!(
                    "event=slot_read module=store status=error slot={} error={}",
                    key, err
                );
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=slot_write module=store status=ok slot={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}
