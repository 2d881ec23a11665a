//! Chart ramp timing and the frame loop that drives it.
//!
//! # Invariants
//! - `progress` is clamped to `0.0..=1.0` and never decreases between
//!   restarts.
//! - An animation that was never started reports full progress.

use crate::activity::Clock;
use std::time::Duration;

/// Ramp length used when no duration is configured.
pub const DEFAULT_CHART_DURATION_MS: u64 = 600;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Monotonic 0..=1 progress ramp restarted on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartAnimation {
    started_at_ms: Option<i64>,
    duration_ms: u64,
}

impl Default for ChartAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_DURATION_MS)
    }
}

impl ChartAnimation {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            started_at_ms: None,
            duration_ms,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Resets progress to 0 at `now_ms`.
    pub fn restart(&mut self, now_ms: i64) {
        self.started_at_ms = Some(now_ms);
    }

    /// Progress at `now_ms`, clamped to `[0, 1]`.
    ///
    /// A never-started animation reports 1 so a static chart draws fully.
    pub fn progress(&self, now_ms: i64) -> f64 {
        let Some(started_at) = self.started_at_ms else {
            return 1.0;
        };
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(started_at).max(0) as f64;
        (elapsed / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now_ms: i64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Yields successive frame timestamps in the animation's time base.
pub trait FrameSource {
    fn next_frame(&mut self) -> i64;
}

/// Display-rate frame source that sleeps between frames.
pub struct SleepingFrames<'a> {
    clock: &'a dyn Clock,
    interval: Duration,
}

impl<'a> SleepingFrames<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            interval: FRAME_INTERVAL,
        }
    }
}

impl FrameSource for SleepingFrames<'_> {
    fn next_frame(&mut self) -> i64 {
        std::thread::sleep(self.interval);
        self.clock.now_ms()
    }
}

/// Invokes `render` once per frame until the animation completes.
///
/// The final call always observes progress 1. Returns the frame count.
pub fn run_frames(
    animation: &ChartAnimation,
    frames: &mut dyn FrameSource,
    mut render: impl FnMut(f64),
) -> usize {
    let mut rendered = 0;
    loop {
        let progress = animation.progress(frames.next_frame());
        render(progress);
        rendered += 1;
        if progress >= 1.0 {
            return rendered;
        }
    }
}
