//! Task record used by the flat task list and the per-day task map.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// One to-do entry.
///
/// Serialized as `{id, text, done, created}`; `created` is Unix epoch
/// milliseconds and may be absent in older payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

impl Task {
    /// Creates an open task stamped with `created_ms`.
    pub fn new(text: impl Into<String>, created_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            done: false,
            created: Some(created_ms),
        }
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }
}

/// Trims user input, returning `None` when nothing is left.
pub fn normalize_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, Task};

    #[test]
    fn legacy_payload_without_id_gets_fresh_ids() {
        let raw = r#"[{"text":"a","done":true,"created":1},{"text":"b","done":false}]"#;
        let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_ne!(tasks[0].id, tasks[1].id);
        assert_eq!(tasks[0].created, Some(1));
        assert_eq!(tasks[1].created, None);
    }

    #[test]
    fn missing_done_defaults_to_false() {
        let task: Task = serde_json::from_str(r#"{"text":"x"}"#).unwrap();
        assert!(!task.done);
    }

    #[test]
    fn toggle_flips_done() {
        let mut task = Task::new("read", 0);
        assert!(task.toggle());
        assert!(!task.toggle());
    }

    #[test]
    fn normalize_text_rejects_blank_input() {
        assert_eq!(normalize_text("   \t"), None);
        assert_eq!(normalize_text("  chem  "), Some("chem"));
    }
}
