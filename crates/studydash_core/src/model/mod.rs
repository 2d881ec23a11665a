//! Domain records shared by the task, calendar and schedule stores.
//!
//! # Invariants
//! - Every record carries a stable id assigned at creation.
//! - Persisted records without an id are assigned one on load.

pub mod date_key;
pub mod schedule;
pub mod task;
pub mod theme;
