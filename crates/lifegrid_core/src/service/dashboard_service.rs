//! Weekly dashboard use-case service.
//!
//! # Responsibility
//! - Gather the window's day logs and dream records from storage.
//! - Hand them to the pure aggregator once all are loaded.
//!
//! # Invariants
//! - Nothing computed here is persisted.
//! - A failed range read fails the whole dashboard; partial weeks are never
//!   reported as complete.

use crate::clock::Clock;
use crate::dashboard::aggregator::{aggregate_window, DayEntry, WeeklyDashboardResponse};
use crate::dashboard::window::WeeklyWindow;
use crate::model::date::LogDate;
use crate::repo::day_log_repo::DayLogRepository;
use crate::repo::dream_repo::DreamRepository;
use crate::service::error::ServiceResult;
use log::debug;
use std::time::Instant;

pub struct DashboardService<L: DayLogRepository, D: DreamRepository, C: Clock> {
    day_logs: L,
    dreams: D,
    clock: C,
}

impl<L: DayLogRepository, D: DreamRepository, C: Clock> DashboardService<L, D, C> {
    pub fn new(day_logs: L, dreams: D, clock: C) -> Self {
        Self {
            day_logs,
            dreams,
            clock,
        }
    }

    /// Dashboard for the 7 days ending today.
    pub fn weekly_dashboard(&self) -> ServiceResult<WeeklyDashboardResponse> {
        self.weekly_dashboard_ending(self.clock.today())
    }

    /// Dashboard for the 7 days ending at `end`.
    pub fn weekly_dashboard_ending(&self, end: LogDate) -> ServiceResult<WeeklyDashboardResponse> {
        self.dashboard_for(WeeklyWindow::ending_at(end))
    }

    /// Dashboard for an explicit `[start, end]` range; must span 7 days.
    pub fn weekly_dashboard_between(
        &self,
        start: LogDate,
        end: LogDate,
    ) -> ServiceResult<WeeklyDashboardResponse> {
        self.dashboard_for(WeeklyWindow::new(start, end)?)
    }

    fn dashboard_for(&self, window: WeeklyWindow) -> ServiceResult<WeeklyDashboardResponse> {
        let started_at = Instant::now();
        let logs = self.day_logs.list_day_logs(window.start(), window.end())?;
        let dreams = self.dreams.list_dreams(window.start(), window.end())?;

        let entries = logs
            .iter()
            .map(|log| DayEntry::from_records(log.date, Some(log), None))
            .chain(
                dreams
                    .iter()
                    .map(|dream| DayEntry::from_records(dream.date, None, Some(dream))),
            );
        let dashboard = aggregate_window(&window, entries);

        debug!(
            "event=dashboard_weekly module=service status=ok start={} end={} logged_days={} duration_ms={}",
            window.start(),
            window.end(),
            dashboard.logged_days,
            started_at.elapsed().as_millis()
        );
        Ok(dashboard)
    }
}
