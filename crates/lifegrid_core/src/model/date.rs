//! Calendar date keys for per-day records.
//!
//! # Responsibility
//! - Parse and format the `YYYY-MM-DD` date keys used by every record.
//! - Classify a date as live, reconstructed or future relative to today.
//!
//! # Invariants
//! - Parsing is strict: exact `YYYY-MM-DD` shape and a real calendar date.
//! - Formatting always produces zero-padded `YYYY-MM-DD`.

use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Invalid `YYYY-MM-DD` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Input does not have the `YYYY-MM-DD` shape.
    Malformed(String),
    /// Input has the right shape but is not a real date (e.g. `2025-02-30`).
    OutOfRange(String),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "date `{value}` must use YYYY-MM-DD format"),
            Self::OutOfRange(value) => write!(f, "date `{value}` is not a valid calendar date"),
        }
    }
}

impl Error for DateParseError {}

/// A calendar date used as the key of per-day records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogDate(NaiveDate);

impl LogDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a date from components, returning `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses a strict `YYYY-MM-DD` key.
    pub fn parse(value: &str) -> Result<Self, DateParseError> {
        let trimmed = value.trim();
        if !DATE_KEY_RE.is_match(trimmed) {
            return Err(DateParseError::Malformed(trimmed.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError::OutOfRange(trimmed.to_string()))
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Returns the date `days` before this one, saturating at the calendar minimum.
    pub fn days_before(self, days: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }

    /// Returns the date `days` after this one, saturating at the calendar maximum.
    pub fn days_after(self, days: u64) -> Self {
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: LogDate) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Formats as `YYYY-MM-DD`.
    pub fn to_key(self) -> String {
        self.0.format(DATE_KEY_FORMAT).to_string()
    }
}

impl Display for LogDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for LogDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for LogDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Serialize for LogDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_key())
    }
}

impl<'de> Deserialize<'de> for LogDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Logging status of a date relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStatus {
    /// Today or yesterday.
    Live,
    /// Older than yesterday; entries are backfilled.
    Reconstructed,
    /// After today; cannot be logged.
    Future,
}

impl DateStatus {
    /// Classifies `date` against `today`.
    pub fn classify(date: LogDate, today: LogDate) -> Self {
        if date > today {
            Self::Future
        } else if date >= today.days_before(1) {
            Self::Live
        } else {
            Self::Reconstructed
        }
    }
}
