//! Daily reflection summary model.

use crate::model::date::LogDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SummaryId = Uuid;

/// Free-text reflection for one date. All numeric metrics are derived from
/// the day log instead of being stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub id: SummaryId,
    pub date: LogDate,
    pub highlight: Option<String>,
    pub reflection: Option<String>,
}

impl DailySummary {
    pub fn new(date: LogDate, highlight: Option<String>, reflection: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            highlight,
            reflection,
        }
    }
}
