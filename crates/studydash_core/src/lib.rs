//! Core domain logic for the study dashboard.
//! This crate is the single source of truth for storage and aggregation invariants.

pub mod activity;
pub mod calendar;
pub mod chart;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod pomodoro;
pub mod repo;
pub mod service;
pub mod store;

pub use activity::{aggregate, Clock, FixedClock, SystemClock, WeekdayCounts};
pub use calendar::{CalendarCell, CalendarGrid, MonthView};
pub use chart::{render_bars, run_frames, ChartAnimation, ChartFrame, FrameSource, SleepingFrames};
pub use config::{ConfigError, DashboardConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date_key::DateKey;
pub use model::schedule::{BlockId, ScheduleBlock, WEEKDAY_LABELS};
pub use model::task::{Task, TaskId};
pub use model::theme::Theme;
pub use pomodoro::{format_time, Countdown, TickOutcome};
pub use repo::daily_tasks::DailyTaskMap;
pub use repo::task_list::TaskList;
pub use repo::weekly_schedule::WeeklySchedule;
pub use repo::{CollectionError, CollectionResult};
pub use service::dashboard::Dashboard;
pub use store::{KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
