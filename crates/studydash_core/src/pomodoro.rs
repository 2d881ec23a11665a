//! Countdown focus timer.
//!
//! # Invariants
//! - `remaining_secs` is always in `1..=duration_secs`.
//! - Expiry stops the countdown, restores the full duration and is reported
//!   exactly once per run.
//! - `start` while running and `pause` while stopped are no-ops.

use crate::store::{KvStore, StoreResult, POMODORO_SLOT};

/// Default focus length: 25 minutes.
pub const DEFAULT_DURATION_SECS: u32 = 25 * 60;

/// Result of one one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is not running; nothing changed.
    Idle,
    /// One second elapsed; `remaining_secs` left.
    Running { remaining_secs: u32 },
    /// The countdown hit zero and was reset to its full duration.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Countdown {
    /// Creates a stopped countdown at its full duration (minimum one second).
    pub fn new(duration_secs: u32) -> Self {
        let duration_secs = duration_secs.max(1);
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
        }
    }

    /// Restores remaining time from the `pomodoroTime` slot.
    ///
    /// Absent, unparsable, non-positive or over-long values fall back to the
    /// full duration.
    pub fn load(store: &dyn KvStore, duration_secs: u32) -> Self {
        let mut countdown = Self::new(duration_secs);
        let full = countdown.duration_secs;
        if let Some(remaining) = store
            .get(POMODORO_SLOT)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|value| u32::try_from(value).ok())
            .filter(|value| (1..=full).contains(value))
        {
            countdown.remaining_secs = remaining;
        }
        countdown
    }

    pub fn persist(&self, store: &mut dyn KvStore) -> StoreResult<()> {
        store.set(POMODORO_SLOT, &self.remaining_secs.to_string())
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts counting. Returns `false` when already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stops counting and keeps the remaining time.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops counting and restores the full duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.duration_secs;
    }

    /// Advances one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.reset();
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        }
    }

    pub fn display(&self) -> String {
        format_time(self.remaining_secs)
    }
}

/// Formats seconds as `M:SS`.
pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
