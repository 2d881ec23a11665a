//! Per-day task map persisted in the `dayData` slot.
//!
//! # Invariants
//! - Keys are stored verbatim so malformed persisted keys survive a load;
//!   only writes through this API are guaranteed to be valid `DateKey`s.
//! - A date whose last task is removed is dropped from the map.

use crate::model::date_key::DateKey;
use crate::model::task::{normalize_text, Task, TaskId};
use crate::repo::{position_of, CollectionError, CollectionResult};
use crate::store::{load_json_entries, save_json, KvStore, StoreResult, DAY_DATA_SLOT};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyTaskMap {
    days: BTreeMap<String, Vec<Task>>,
}

impl DailyTaskMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from raw entries, dropping empty ones.
    pub fn from_entries(mut days: BTreeMap<String, Vec<Task>>) -> Self {
        days.retain(|_, tasks| !tasks.is_empty());
        Self { days }
    }

    pub fn load(store: &dyn KvStore) -> Self {
        Self::from_entries(load_json_entries(store, DAY_DATA_SLOT))
    }

    pub fn persist(&self, store: &mut dyn KvStore) -> StoreResult<()> {
        save_json(store, DAY_DATA_SLOT, &self.days)
    }

    /// Iterates raw `(date key, tasks)` entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[Task])> {
        self.days
            .iter()
            .map(|(key, tasks)| (key.as_str(), tasks.as_slice()))
    }

    /// Tasks stored for `date`, empty when none.
    pub fn tasks_for(&self, date: DateKey) -> &[Task] {
        self.days
            .get(&date.to_string())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_tasks(&self, date: DateKey) -> bool {
        !self.tasks_for(date).is_empty()
    }

    /// Valid dates that currently hold at least one task.
    pub fn dates_with_tasks(&self) -> BTreeSet<DateKey> {
        self.days.keys().filter_map(|key| DateKey::parse(key)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn add(&mut self, date: DateKey, text: &str, created_ms: i64) -> Option<TaskId> {
        let text = normalize_text(text)?;
        let task = Task::new(text, created_ms);
        let id = task.id;
        self.days.entry(date.to_string()).or_default().push(task);
        Some(id)
    }

    pub fn toggle(&mut self, date: DateKey, id: TaskId) -> CollectionResult<bool> {
        let tasks = self
            .days
            .get_mut(&date.to_string())
            .ok_or(CollectionError::NotFound(id))?;
        let index = position_of(tasks.as_slice(), id, |task| task.id).ok_or(CollectionError::NotFound(id))?;
        Ok(tasks[index].toggle())
    }

    pub fn toggle_at(&mut self, date: DateKey, index: usize) -> Option<bool> {
        self.days
            .get_mut(&date.to_string())
            .and_then(|tasks| tasks.get_mut(index))
            .map(Task::toggle)
    }

    pub fn remove(&mut self, date: DateKey, id: TaskId) -> CollectionResult<Task> {
        let key = date.to_string();
        let index = self
            .days
            .get(&key)
            .and_then(|tasks| position_of(tasks, id, |task| task.id))
            .ok_or(CollectionError::NotFound(id))?;
        self.remove_index(&key, index)
            .ok_or(CollectionError::NotFound(id))
    }

    pub fn remove_at(&mut self, date: DateKey, index: usize) -> Option<Task> {
        self.remove_index(&date.to_string(), index)
    }

    fn remove_index(&mut self, key: &str, index: usize) -> Option<Task> {
        let tasks = self.days.get_mut(key)?;
        if index >= tasks.len() {
            return None;
        }
        let removed = tasks.remove(index);
        if tasks.is_empty() {
            self.days.remove(key);
        }
        Some(removed)
    }
}
