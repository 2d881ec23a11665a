//! Animated weekday bar chart.
//!
//! # Responsibility
//! - Ramp an animation progress value from 0 to 1 over a fixed duration.
//! - Lay out bars for a `WeekdayCounts` snapshot at a given progress.
//!
//! # Invariants
//! - Rendering never mutates its input and may be repeated with stale data.
//! - An all-zero vector renders flat bars (scale denominator is at least 1).

mod animation;
mod render;

pub use animation::{
    run_frames, ChartAnimation, FrameSource, SleepingFrames, DEFAULT_CHART_DURATION_MS,
};
pub use render::{render_bars, Bar, ChartFrame};
