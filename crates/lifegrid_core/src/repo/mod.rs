//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-record data access contracts (fetch-by-date,
//!   upsert-by-date, list-by-range).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories store already-validated domain values; input validation
//!   lives in the model and service layers.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidData`) in
//!   addition to DB transport errors.

pub mod day_log_repo;
pub mod dream_repo;
pub mod event_repo;
pub mod summary_repo;
