//! Dream record model.
//!
//! # Invariants
//! - At most one dream record exists per date.
//! - `description` is always `None` when `dream_state` is `DreamState::None`.

use crate::model::date::LogDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type DreamId = Uuid;

/// Whether a dream happened and was remembered.
///
/// Serialized as the integer codes `0`, `1`, `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum DreamState {
    #[default]
    None,
    Unremembered,
    Remembered,
}

impl DreamState {
    pub fn code(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Unremembered => 1,
            Self::Remembered => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Unremembered),
            2 => Some(Self::Remembered),
            _ => None,
        }
    }

    /// Returns whether this state counts as a dream day.
    pub fn had_dream(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<DreamState> for i64 {
    fn from(value: DreamState) -> Self {
        value.code()
    }
}

impl TryFrom<i64> for DreamState {
    type Error = UnknownDreamState;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_code(value).ok_or(UnknownDreamState(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDreamState(pub i64);

impl Display for UnknownDreamState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown dream state {}; expected 0, 1 or 2", self.0)
    }
}

impl Error for UnknownDreamState {}

/// One day's dream entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamRecord {
    pub id: DreamId,
    pub date: LogDate,
    pub dream_state: DreamState,
    pub description: Option<String>,
}

impl DreamRecord {
    /// Creates a record, dropping the description unless a dream happened.
    pub fn new(date: LogDate, dream_state: DreamState, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            dream_state,
            description: normalize_description(dream_state, description),
        }
    }
}

/// Applies the description rule: blank text and `DreamState::None` both clear it.
pub fn normalize_description(state: DreamState, description: Option<String>) -> Option<String> {
    if !state.had_dream() {
        return None;
    }
    description.filter(|value| !value.trim().is_empty())
}
