//! Seven-day dashboard window.
//!
//! # Invariants
//! - A window always spans exactly 7 contiguous dates, `start <= end`.
//! - Dates iterate oldest first.

use crate::model::date::LogDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of dates in a weekly window.
pub const WINDOW_DAYS: usize = 7;

/// Malformed weekly window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    StartAfterEnd { start: LogDate, end: LogDate },
    WrongSpan { start: LogDate, end: LogDate, days: i64 },
}

impl Display for WindowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartAfterEnd { start, end } => {
                write!(f, "window start {start} is after end {end}")
            }
            Self::WrongSpan { start, end, days } => write!(
                f,
                "window {start}..={end} spans {days} days; expected {WINDOW_DAYS}"
            ),
        }
    }
}

impl Error for WindowError {}

/// Inclusive range of 7 contiguous dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeeklyWindow {
    start: LogDate,
    end: LogDate,
}

impl WeeklyWindow {
    /// The 7 dates ending at `end`, inclusive.
    pub fn ending_at(end: LogDate) -> Self {
        Self {
            start: end.days_before(WINDOW_DAYS as u64 - 1),
            end,
        }
    }

    /// Validates an explicit `[start, end]` range.
    pub fn new(start: LogDate, end: LogDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::StartAfterEnd { start, end });
        }
        let days = start.days_until(end) + 1;
        if days != WINDOW_DAYS as i64 {
            return Err(WindowError::WrongSpan { start, end, days });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> LogDate {
        self.start
    }

    pub fn end(&self) -> LogDate {
        self.end
    }

    pub fn contains(&self, date: LogDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// All dates in the window, oldest first.
    pub fn dates(&self) -> [LogDate; WINDOW_DAYS] {
        let mut dates = [self.start; WINDOW_DAYS];
        for (offset, slot) in dates.iter_mut().enumerate() {
            *slot = self.start.days_after(offset as u64);
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::{WeeklyWindow, WindowError};
    use crate::model::date::LogDate;

    fn date(value: &str) -> LogDate {
        LogDate::parse(value).unwrap()
    }

    #[test]
    fn ending_at_covers_six_previous_days() {
        let window = WeeklyWindow::ending_at(date("2025-03-02"));
        assert_eq!(window.start(), date("2025-02-24"));
        let dates = window.dates();
        assert_eq!(dates[0], date("2025-02-24"));
        assert_eq!(dates[6], date("2025-03-02"));
        assert!(window.contains(date("2025-02-28")));
        assert!(!window.contains(date("2025-03-03")));
    }

    #[test]
    fn new_rejects_reversed_and_wrong_length_ranges() {
        assert!(matches!(
            WeeklyWindow::new(date("2025-03-08"), date("2025-03-02")),
            Err(WindowError::StartAfterEnd { .. })
        ));
        assert!(matches!(
            WeeklyWindow::new(date("2025-03-01"), date("2025-03-02")),
            Err(WindowError::WrongSpan { days: 2, .. })
        ));
        assert_eq!(
            WeeklyWindow::new(date("2025-02-24"), date("2025-03-02")).unwrap(),
            WeeklyWindow::ending_at(date("2025-03-02"))
        );
    }
}
