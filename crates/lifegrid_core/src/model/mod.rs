//! LifeGrid domain model.
//!
//! # Responsibility
//! - Define the per-day records (hour grid, dream, summary) and events.
//! - Own the fixed category taxonomy and date key handling.
//!
//! # Invariants
//! - Per-day records are keyed by `LogDate`; at most one per date.
//! - Hour slots are typed `Option<Category>`; no sentinel integers inside
//!   the model.

pub mod category;
pub mod date;
pub mod day_log;
pub mod dream;
pub mod event;
pub mod summary;
