//! Derived weekday activity view.
//!
//! # Responsibility
//! - Combine completed daily tasks, completed flat tasks and schedule blocks
//!   into one Monday-first count vector.
//!
//! # Invariants
//! - The vector is a pure function of current store contents; nothing
//!   accumulates across calls.
//! - Aggregation never fails; malformed inputs contribute zero.

mod aggregate;
mod clock;

pub use aggregate::{aggregate, WeekdayCounts};
pub use clock::{Clock, FixedClock, SystemClock};
