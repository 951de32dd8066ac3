//! Source of "today" for date-relative rules.
//!
//! Services never read the system clock directly so that future-date checks
//! and the live/reconstructed split can be tested with a fixed date.

use crate::model::date::LogDate;
use chrono::Local;

pub trait Clock {
    /// The current local calendar date.
    fn today(&self) -> LogDate;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> LogDate {
        LogDate::new(Local::now().date_naive())
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub LogDate);

impl Clock for FixedClock {
    fn today(&self) -> LogDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> LogDate {
        (**self).today()
    }
}
