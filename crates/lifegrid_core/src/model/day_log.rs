//! Hour-by-hour day log model.
//!
//! # Responsibility
//! - Hold the 24 category slots recorded for one calendar date.
//! - Convert between typed slots and the wire/storage integer codes.
//!
//! # Invariants
//! - A day log always has exactly 24 slots.
//! - `None` is the only representation of an unassigned hour.
//! - Strict conversion rejects unknown codes; lenient conversion maps them
//!   to unassigned.

use crate::model::category::{Category, CATEGORY_COUNT, UNASSIGNED_CODE};
use crate::model::date::LogDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Number of hour slots in a day.
pub const HOURS_IN_DAY: usize = 24;

/// Stable identifier of a stored day log.
pub type DayLogId = Uuid;

/// Validation errors for incoming hour arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayLogValidationError {
    /// Array length is not 24.
    WrongLength(usize),
    /// A slot holds a code that is neither `-1` nor `0..=11`.
    InvalidCode { hour: usize, code: i64 },
}

impl Display for DayLogValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength(len) => write!(
                f,
                "hours must have exactly {HOURS_IN_DAY} elements, got {len}"
            ),
            Self::InvalidCode { hour, code } => write!(
                f,
                "hour[{hour}] value {code} must be {UNASSIGNED_CODE}, null, or between 0 and {}",
                CATEGORY_COUNT - 1
            ),
        }
    }
}

impl Error for DayLogValidationError {}

/// The 24 category slots of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayHours([Option<Category>; HOURS_IN_DAY]);

impl DayHours {
    /// A day where every hour is unassigned.
    pub fn unassigned() -> Self {
        Self([None; HOURS_IN_DAY])
    }

    /// Builds a day from typed slots.
    pub fn from_slots(slots: [Option<Category>; HOURS_IN_DAY]) -> Self {
        Self(slots)
    }

    /// Converts wire codes strictly.
    ///
    /// Accepts `None` or `-1` as unassigned and `0..=11` as categories.
    pub fn from_codes(codes: &[Option<i64>]) -> Result<Self, DayLogValidationError> {
        if codes.len() != HOURS_IN_DAY {
            return Err(DayLogValidationError::WrongLength(codes.len()));
        }

        let mut slots = [None; HOURS_IN_DAY];
        for (hour, code) in codes.iter().enumerate() {
            slots[hour] = match *code {
                None | Some(UNASSIGNED_CODE) => None,
                Some(value) => Some(
                    Category::from_code(value)
                        .ok_or(DayLogValidationError::InvalidCode { hour, code: value })?,
                ),
            };
        }
        Ok(Self(slots))
    }

    /// Converts stored codes leniently: `None` and any code outside `0..=11`
    /// become unassigned.
    ///
    /// Length is still enforced since slot positions carry meaning.
    pub fn from_codes_lenient(codes: &[Option<i64>]) -> Result<Self, DayLogValidationError> {
        if codes.len() != HOURS_IN_DAY {
            return Err(DayLogValidationError::WrongLength(codes.len()));
        }

        let mut slots = [None; HOURS_IN_DAY];
        for (slot, code) in slots.iter_mut().zip(codes) {
            *slot = code.and_then(Category::from_code);
        }
        Ok(Self(slots))
    }

    /// Returns wire codes, `-1` for unassigned.
    pub fn to_codes(&self) -> Vec<i64> {
        self.0
            .iter()
            .map(|slot| slot.map_or(UNASSIGNED_CODE, i64::from))
            .collect()
    }

    pub fn slots(&self) -> &[Option<Category>; HOURS_IN_DAY] {
        &self.0
    }

    pub fn get(&self, hour: usize) -> Option<Category> {
        self.0.get(hour).copied().flatten()
    }

    /// Assigns one hour. Out-of-range hours are ignored.
    pub fn set(&mut self, hour: usize, category: Option<Category>) {
        if let Some(slot) = self.0.get_mut(hour) {
            *slot = category;
        }
    }

    /// Per-category hour counts, indexed by category code.
    pub fn counts(&self) -> [u32; CATEGORY_COUNT] {
        let mut counts = [0_u32; CATEGORY_COUNT];
        for category in self.0.iter().flatten() {
            counts[category.index()] += 1;
        }
        counts
    }

    /// Number of hours with a category.
    pub fn tracked_hours(&self) -> u32 {
        self.0.iter().filter(|slot| slot.is_some()).count() as u32
    }
}

impl Default for DayHours {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl Serialize for DayHours {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_codes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DayHours {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let codes = Vec::<Option<i64>>::deserialize(deserializer)?;
        Self::from_codes(&codes).map_err(serde::de::Error::custom)
    }
}

/// One stored day of hour assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLog {
    pub id: DayLogId,
    pub date: LogDate,
    pub hours: DayHours,
    /// Set when the log was written after the live window (today + yesterday).
    /// Provenance only; aggregation ignores it.
    pub is_reconstructed: bool,
}

impl DayLog {
    /// Creates a new day log with a generated id.
    pub fn new(date: LogDate, hours: DayHours, is_reconstructed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            hours,
            is_reconstructed,
        }
    }
}
