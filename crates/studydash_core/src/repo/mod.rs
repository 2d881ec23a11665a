//! Owned state objects for the three aggregator inputs.
//!
//! # Responsibility
//! - Hold the in-memory mirror of each persisted collection.
//! - Load with empty-default fallback and persist full snapshots.
//!
//! # Invariants
//! - Add operations ignore input that trims to empty.
//! - Keyed collections never keep an empty entry after a mutation.
//! - Records are addressable by stable id and by display position.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod daily_tasks;
pub mod task_list;
pub mod weekly_schedule;

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Semantic error for id-addressed collection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    NotFound(Uuid),
    InvalidWeekday(u8),
    InvalidDateKey(String),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidWeekday(index) => {
                write!(f, "invalid weekday index {index}; expected 0..=6 (Monday-first)")
            }
            Self::InvalidDateKey(value) => write!(f, "invalid date key `{value}`; expected YYYY-MM-DD"),
        }
    }
}

impl Error for CollectionError {}

/// Finds the position of the record whose id matches `id`.
pub(crate) fn position_of<T>(items: &[T], id: Uuid, id_of: impl Fn(&T) -> Uuid) -> Option<usize> {
    items.iter().position(|item| id_of(item) == id)
}
