//! Weekly dashboard computation.
//!
//! # Responsibility
//! - Define the 7-day window and the dashboard response shape.
//! - Aggregate per-day hour grids and dream states into weekly insights.
//!
//! # Invariants
//! - Aggregation is a pure function of its inputs; gathering records is the
//!   caller's job (see `service::dashboard_service`).

pub mod aggregator;
pub mod window;
