//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Apply date-relative write rules using an injected `Clock`.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod dashboard_service;
pub mod day_log_service;
pub mod error;
pub mod event_service;
pub mod journal_service;
