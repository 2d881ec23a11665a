//! Flat, ordered task list persisted in the `tasks` slot.

use crate::model::task::{normalize_text, Task, TaskId};
use crate::repo::{position_of, CollectionError, CollectionResult};
use crate::store::{load_json, save_json, KvStore, StoreResult, TASKS_SLOT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    items: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(items: Vec<Task>) -> Self {
        Self { items }
    }

    /// Loads the list, substituting an empty list for missing/bad data.
    pub fn load(store: &dyn KvStore) -> Self {
        Self::from_tasks(load_json(store, TASKS_SLOT))
    }

    /// Writes the full list back to its slot.
    pub fn persist(&self, store: &mut dyn KvStore) -> StoreResult<()> {
        save_json(store, TASKS_SLOT, &self.items)
    }

    pub fn items(&self) -> &[Task] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an open task. Returns `None` when `text` is blank.
    pub fn add(&mut self, text: &str, created_ms: i64) -> Option<TaskId> {
        let text = normalize_text(text)?;
        let task = Task::new(text, created_ms);
        let id = task.id;
        self.items.push(task);
        Some(id)
    }

    /// Flips completion by id and returns the new flag.
    pub fn toggle(&mut self, id: TaskId) -> CollectionResult<bool> {
        let index = position_of(&self.items, id, |task| task.id).ok_or(CollectionError::NotFound(id))?;
        Ok(self.items[index].toggle())
    }

    /// Flips completion by position. Out-of-range positions are ignored.
    pub fn toggle_at(&mut self, index: usize) -> Option<bool> {
        self.items.get_mut(index).map(Task::toggle)
    }

    /// Removes by id; later records shift down by one position.
    pub fn remove(&mut self, id: TaskId) -> CollectionResult<Task> {
        let index = position_of(&self.items, id, |task| task.id).ok_or(CollectionError::NotFound(id))?;
        Ok(self.items.remove(index))
    }

    /// Removes by position. Out-of-range positions are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Task> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}
