//! Persistent key-value slot storage.
//!
//! # Responsibility
//! - Define the slot contract every stateful component persists through.
//! - Provide JSON encode/decode helpers with empty-default fallback.
//!
//! # Invariants
//! - `get` never fails: backend read errors surface as absence.
//! - `load_json` never propagates a parse failure; it substitutes `T::default()`.
//! - `load_json_entries` drops only the entries that fail to decode.

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_store;
mod sqlite_store;

pub use memory_store::MemoryKvStore;
pub use sqlite_store::SqliteKvStore;

/// Slot holding the `dark`/`light` theme preference.
pub const THEME_SLOT: &str = "theme";
/// Slot holding the flat task list.
pub const TASKS_SLOT: &str = "tasks";
/// Slot holding raw notes text.
pub const NOTES_SLOT: &str = "notes";
/// Slot holding countdown remaining seconds.
pub const POMODORO_SLOT: &str = "pomodoroTime";
/// Slot holding the date-keyed task map.
pub const DAY_DATA_SLOT: &str = "dayData";
/// Slot holding the weekday-keyed schedule map.
pub const WEEK_DATA_SLOT: &str = "weekData";

pub type StoreResult<T> = Result<T, StoreError>;

/// Write-side error for slot persistence.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode slot value: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Named-slot key-value storage.
///
/// Values are opaque serialized strings; each caller owns its encoding.
pub trait KvStore {
    /// Returns the stored value, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;
    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`. Removing an absent key is a no-op.
    fn delete(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

/// Loads and decodes a JSON slot, degrading to `T::default()`.
///
/// Absent slots are silent; unparsable content is logged at `warn`.
pub fn load_json<T>(store: &dyn KvStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=slot_decode module=store status=fallback slot={} error={}",
                key, err
            );
            T::default()
        }
    }
}

/// Loads a JSON object slot entry by entry.
///
/// A value that does not decode as `V` is skipped with a `warn` event; the
/// remaining entries are kept. A slot that is not an object yields an empty map.
pub fn load_json_entries<V>(store: &dyn KvStore, key: &str) -> BTreeMap<String, V>
where
    V: DeserializeOwned,
{
    let raw: BTreeMap<String, Value> = load_json(store, key);
    raw.into_iter()
        .filter_map(|(entry, value)| match serde_json::from_value(value) {
            Ok(decoded) => Some((entry, decoded)),
            Err(err) => {
                warn!(
                    "event=slot_decode module=store status=skip_entry slot={} key={} error={}",
                    key, entry, err
                );
                None
            }
        })
        .collect()
}

/// Encodes `value` as JSON and writes it to `key`.
pub fn save_json<T>(store: &mut dyn KvStore, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::{load_json, load_json_entries, save_json, KvStore, MemoryKvStore};
    use std::collections::BTreeMap;

    #[test]
    fn load_json_defaults_when_slot_is_absent() {
        let store = MemoryKvStore::new();
        let value: Vec<String> = load_json(&store, "missing");
        assert!(value.is_empty());
    }

    #[test]
    fn load_json_defaults_when_slot_is_malformed() {
        let mut store = MemoryKvStore::new();
        store.set("broken", "{not json").unwrap();
        let value: BTreeMap<String, Vec<u32>> = load_json(&store, "broken");
        assert!(value.is_empty());
    }

    #[test]
    fn load_json_defaults_when_shape_does_not_match() {
        let mut store = MemoryKvStore::new();
        store.set("shape", r#"{"a": 1}"#).unwrap();
        let value: Vec<String> = load_json(&store, "shape");
        assert!(value.is_empty());
    }

    #[test]
    fn load_json_entries_skips_only_undecodable_values() {
        let mut store = MemoryKvStore::new();
        store
            .set("map", r#"{"good": [1, 2], "null": null, "typo": ["x"]}"#)
            .unwrap();
        let value: BTreeMap<String, Vec<u32>> = load_json_entries(&store, "map");
        assert_eq!(value.len(), 1);
        assert_eq!(value["good"], vec![1, 2]);
    }

    #[test]
    fn load_json_entries_defaults_when_slot_is_not_an_object() {
        let mut store = MemoryKvStore::new();
        store.set("map", "[1, 2]").unwrap();
        let value: BTreeMap<String, Vec<u32>> = load_json_entries(&store, "map");
        assert!(value.is_empty());
    }

    #[test]
    fn save_json_writes_compact_json() {
        let mut store = MemoryKvStore::new();
        save_json(&mut store, "list", &vec!["a", "b"]).unwrap();
        assert_eq!(store.get("list").as_deref(), Some(r#"["a","b"]"#));
    }
}
