//! Weekday activity aggregation.
//!
//! # Responsibility
//! - Fold completed daily tasks, completed flat tasks and schedule blocks
//!   into one Monday-first count per weekday.
//!
//! # Invariants
//! - Pure over its inputs and the clock reading; repeated calls agree.
//! - The total equals completed daily tasks plus completed flat tasks plus
//!   schedule blocks.
//! - A malformed date key contributes nothing and never stops the fold.

use super::Clock;
use crate::model::date_key::DateKey;
use crate::model::schedule::{DAYS_PER_WEEK, WEEKDAY_LABELS};
use crate::repo::daily_tasks::DailyTaskMap;
use crate::repo::task_list::TaskList;
use crate::repo::weekly_schedule::WeeklySchedule;
use log::debug;
use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};

/// Load per weekday, Monday-first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeekdayCounts([u32; DAYS_PER_WEEK]);

impl WeekdayCounts {
    pub fn new(counts: [u32; DAYS_PER_WEEK]) -> Self {
        Self(counts)
    }

    pub fn as_array(&self) -> &[u32; DAYS_PER_WEEK] {
        &self.0
    }

    pub fn get(&self, weekday: usize) -> Option<u32> {
        self.0.get(weekday).copied()
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// `(label, count)` pairs in Monday-first order.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        WEEKDAY_LABELS.iter().copied().zip(self.0.iter().copied())
    }

    fn bump(&mut self, weekday: usize, by: u32) {
        self.0[weekday] = self.0[weekday].saturating_add(by);
    }
}

/// Recomputes the weekday activity vector from scratch.
///
/// Contributions:
/// - every completed daily task whose date key parses, on that date's weekday;
/// - every completed flat task, on the local weekday of `created`
///   (falling back to "now" when absent);
/// - every schedule block, on its own weekday.
pub fn aggregate(
    daily: &DailyTaskMap,
    tasks: &TaskList,
    schedule: &WeeklySchedule,
    clock: &dyn Clock,
) -> WeekdayCounts {
    let mut counts = WeekdayCounts::default();
    let mut skipped_keys = 0usize;

    for (key, day_tasks) in daily.entries() {
        let done = day_tasks.iter().filter(|task| task.done).count();
        if done == 0 {
            continue;
        }
        match DateKey::parse(key) {
            Some(date) => counts.bump(date.weekday_index(), saturating_u32(done)),
            None => skipped_keys += 1,
        }
    }

    let offset = clock.offset();
    for task in tasks.items().iter().filter(|task| task.done) {
        let created = task.created.unwrap_or_else(|| clock.now_ms());
        if let Some(weekday) = local_weekday_index(created, offset) {
            counts.bump(weekday, 1);
        }
    }

    for (weekday, blocks) in schedule.counts().into_iter().enumerate() {
        counts.bump(weekday, saturating_u32(blocks));
    }

    debug!(
        "event=activity_recompute module=activity status=ok total={} skipped_keys={}",
        counts.total(),
        skipped_keys
    );
    counts
}

/// Monday-first weekday of an epoch-millisecond instant in `offset`.
///
/// Returns `None` for instants outside the representable date range.
fn local_weekday_index(epoch_ms: i64, offset: UtcOffset) -> Option<usize> {
    let shifted_ms = i128::from(epoch_ms) + i128::from(offset.whole_seconds()) * 1_000;
    let local = OffsetDateTime::from_unix_timestamp_nanos(shifted_ms * 1_000_000).ok()?;
    Some(usize::from(local.weekday().number_days_from_monday()))
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
