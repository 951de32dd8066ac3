//! Weekly dashboard aggregation.
//!
//! # Responsibility
//! - Turn a week of day logs and dream records into dashboard statistics.
//!
//! # Invariants
//! - Pure and deterministic: no I/O, no clock, same input gives same output.
//! - Days without a log contribute neither tracked nor unassigned hours and
//!   are excluded from the sleep average denominator.
//! - `category_totals` omits zero categories and is ordered by hours
//!   descending, then category code ascending.
//! - Days with zero tracked hours never win "most balanced day".

use crate::dashboard::window::{WeeklyWindow, WindowError};
use crate::model::category::{Category, CATEGORY_COUNT};
use crate::model::date::LogDate;
use crate::model::day_log::{DayHours, DayLog, HOURS_IN_DAY};
use crate::model::dream::{DreamRecord, DreamState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input for one date of the window. Either part may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub date: LogDate,
    pub hours: Option<DayHours>,
    pub dream_state: Option<DreamState>,
}

impl DayEntry {
    pub fn new(date: LogDate) -> Self {
        Self {
            date,
            hours: None,
            dream_state: None,
        }
    }

    /// Builds an entry from stored records for `date`.
    pub fn from_records(
        date: LogDate,
        day_log: Option<&DayLog>,
        dream: Option<&DreamRecord>,
    ) -> Self {
        Self {
            date,
            hours: day_log.map(|log| log.hours),
            dream_state: dream.map(|record| record.dream_state),
        }
    }

    pub fn with_hours(mut self, hours: DayHours) -> Self {
        self.hours = Some(hours);
        self
    }

    pub fn with_dream(mut self, state: DreamState) -> Self {
        self.dream_state = Some(state);
        self
    }
}

/// Per-day row of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDashboardDay {
    pub date: LogDate,
    pub has_log: bool,
    /// Hours per category, indexed by category code.
    pub counts: [u32; CATEGORY_COUNT],
    pub tracked_hours: u32,
    pub unassigned_hours: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: Category,
    pub hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyInsights {
    pub average_sleep_hours: f64,
    /// Highest weekly total, Sleep included.
    pub most_frequent_category: Option<Category>,
    pub most_balanced_day: Option<LogDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DreamMetrics {
    pub dream_days: u32,
    pub remembered_count: u32,
    pub unremembered_count: u32,
}

/// Dashboard statistics for one weekly window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDashboardResponse {
    pub start_date: LogDate,
    pub end_date: LogDate,
    pub days: Vec<WeeklyDashboardDay>,
    pub total_tracked_hours: u32,
    pub average_sleep_hours: f64,
    pub logged_days: u32,
    pub category_totals: Vec<CategoryTotal>,
    pub insights: WeeklyInsights,
    pub dreams: DreamMetrics,
}

/// Validates `[start, end]` and aggregates `entries` over it.
pub fn aggregate(
    start: LogDate,
    end: LogDate,
    entries: impl IntoIterator<Item = DayEntry>,
) -> Result<WeeklyDashboardResponse, WindowError> {
    let window = WeeklyWindow::new(start, end)?;
    Ok(aggregate_window(&window, entries))
}

/// Aggregates `entries` over an already validated window.
///
/// Entries may arrive in any order. Entries outside the window are ignored.
/// For duplicate dates, later present values replace earlier ones.
pub fn aggregate_window(
    window: &WeeklyWindow,
    entries: impl IntoIterator<Item = DayEntry>,
) -> WeeklyDashboardResponse {
    let mut by_date: BTreeMap<LogDate, (Option<DayHours>, Option<DreamState>)> = BTreeMap::new();
    for entry in entries {
        if !window.contains(entry.date) {
            continue;
        }
        let slot = by_date.entry(entry.date).or_default();
        if entry.hours.is_some() {
            slot.0 = entry.hours;
        }
        if entry.dream_state.is_some() {
            slot.1 = entry.dream_state;
        }
    }

    let mut days = Vec::with_capacity(window.dates().len());
    let mut weekly_counts = [0_u32; CATEGORY_COUNT];
    let mut total_tracked = 0_u32;
    let mut total_sleep = 0_u32;
    let mut logged_days = 0_u32;
    let mut dreams = DreamMetrics::default();

    for date in window.dates() {
        let (hours, dream_state) = by_date.get(&date).copied().unwrap_or_default();

        let day = match hours {
            Some(hours) => {
                let counts = hours.counts();
                let tracked = hours.tracked_hours();
                logged_days += 1;
                total_tracked += tracked;
                total_sleep += counts[Category::Sleep.index()];
                for (total, count) in weekly_counts.iter_mut().zip(counts) {
                    *total += count;
                }
                WeeklyDashboardDay {
                    date,
                    has_log: true,
                    counts,
                    tracked_hours: tracked,
                    unassigned_hours: HOURS_IN_DAY as u32 - tracked,
                }
            }
            None => WeeklyDashboardDay {
                date,
                has_log: false,
                counts: [0; CATEGORY_COUNT],
                tracked_hours: 0,
                unassigned_hours: 0,
            },
        };
        days.push(day);

        match dream_state {
            Some(DreamState::Remembered) => {
                dreams.dream_days += 1;
                dreams.remembered_count += 1;
            }
            Some(DreamState::Unremembered) => {
                dreams.dream_days += 1;
                dreams.unremembered_count += 1;
            }
            Some(DreamState::None) | None => {}
        }
    }

    let average_sleep_hours = if logged_days > 0 {
        f64::from(total_sleep) / f64::from(logged_days)
    } else {
        0.0
    };
    let category_totals = category_totals(&weekly_counts);
    let most_frequent_category = category_totals.first().map(|total| total.category_id);
    let most_balanced_day = most_balanced_day(&days);

    WeeklyDashboardResponse {
        start_date: window.start(),
        end_date: window.end(),
        days,
        total_tracked_hours: total_tracked,
        average_sleep_hours,
        logged_days,
        category_totals,
        insights: WeeklyInsights {
            average_sleep_hours,
            most_frequent_category,
            most_balanced_day,
        },
        dreams,
    }
}

/// Nonzero weekly totals, hours descending then code ascending.
pub fn category_totals(weekly_counts: &[u32; CATEGORY_COUNT]) -> Vec<CategoryTotal> {
    let mut totals = Category::ALL
        .iter()
        .zip(weekly_counts)
        .filter(|(_, hours)| **hours > 0)
        .map(|(category, hours)| CategoryTotal {
            category_id: *category,
            hours: *hours,
        })
        .collect::<Vec<_>>();
    totals.sort_by(|a, b| {
        b.hours
            .cmp(&a.hours)
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    totals
}

/// Population variance of the 12 category counts.
pub fn population_variance(counts: &[u32; CATEGORY_COUNT]) -> f64 {
    variance_numerator(counts) as f64 / (CATEGORY_COUNT * CATEGORY_COUNT) as f64
}

/// Variance scaled by `12²`: `12·Σc² − (Σc)²`.
///
/// Integer form keeps day-to-day comparisons exact.
fn variance_numerator(counts: &[u32; CATEGORY_COUNT]) -> u64 {
    let sum: u64 = counts.iter().map(|count| u64::from(*count)).sum();
    let sum_squares: u64 = counts
        .iter()
        .map(|count| u64::from(*count) * u64::from(*count))
        .sum();
    CATEGORY_COUNT as u64 * sum_squares - sum * sum
}

/// Earliest logged day with the lowest count variance, skipping empty days.
pub fn most_balanced_day(days: &[WeeklyDashboardDay]) -> Option<LogDate> {
    let mut best: Option<(u64, LogDate)> = None;
    for day in days {
        if !day.has_log || day.tracked_hours == 0 {
            continue;
        }
        let score = variance_numerator(&day.counts);
        let replace = match best {
            None => true,
            Some((best_score, best_date)) => {
                score < best_score || (score == best_score && day.date < best_date)
            }
        };
        if replace {
            best = Some((score, day.date));
        }
    }
    best.map(|(_, date)| date)
}
