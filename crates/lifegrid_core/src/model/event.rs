//! Notable event model.
//!
//! # Invariants
//! - `title` is trimmed and never blank.
//! - Many events may share a date; identity is the UUID.

use crate::model::category::Category;
use crate::model::date::LogDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EventId = Uuid;

/// A memorable thing that happened on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotableEvent {
    pub id: EventId,
    pub date: LogDate,
    pub title: String,
    pub description: Option<String>,
    /// Optional category tag, independent of the day's hour grid.
    pub category: Option<Category>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Input for creating a notable event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotableEvent {
    pub date: LogDate,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<Category>,
}
