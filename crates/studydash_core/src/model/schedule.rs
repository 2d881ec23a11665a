//! Weekly schedule block record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a schedule block.
pub type BlockId = Uuid;

/// Number of weekday slots, Monday-first.
pub const DAYS_PER_WEEK: usize = 7;

/// Short Monday-first weekday labels.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Free-text planned study block for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBlock")]
pub struct ScheduleBlock {
    pub id: BlockId,
    pub text: String,
}

impl ScheduleBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

/// Accepts both the legacy bare-string shape and the `{id, text}` record.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBlock {
    Text(String),
    Record {
        #[serde(default = "Uuid::new_v4")]
        id: BlockId,
        text: String,
    },
}

impl From<RawBlock> for ScheduleBlock {
    fn from(value: RawBlock) -> Self {
        match value {
            RawBlock::Text(text) => Self::new(text),
            RawBlock::Record { id, text } => Self { id, text },
        }
    }
}

/// Converts a Sunday-first day-of-week (0 = Sunday) into a Monday-first index.
pub fn weekday_index_from_sunday_first(day_of_week: u8) -> usize {
    (usize::from(day_of_week) + 6) % DAYS_PER_WEEK
}

/// Persisted map key for a Monday-first weekday index (`day0`..`day6`).
pub fn weekday_slot_key(index: usize) -> String {
    format!("day{index}")
}

/// Parses a `day0`..`day6` key back into its weekday index.
pub fn parse_weekday_slot_key(key: &str) -> Option<usize> {
    let index = key.strip_prefix("day")?.parse::<usize>().ok()?;
    (index < DAYS_PER_WEEK).then_some(index)
}
