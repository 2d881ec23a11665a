//! Use-case facade over the dashboard stores.
//!
//! # Responsibility
//! - Sequence every mutation as: mutate, persist, recompute, restart chart.
//! - Keep callers decoupled from slot layout and storage backend.

pub mod dashboard;
