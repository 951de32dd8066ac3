//! Core domain logic for LifeGrid.
//! This crate is the single source of truth for hour-grid invariants and the
//! weekly dashboard computation.

pub mod clock;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use dashboard::aggregator::{
    aggregate, aggregate_window, population_variance, CategoryTotal, DayEntry, DreamMetrics,
    WeeklyDashboardDay, WeeklyDashboardResponse, WeeklyInsights,
};
pub use dashboard::window::{WeeklyWindow, WindowError, WINDOW_DAYS};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::category::{Category, CategoryCatalog, CategoryMeta, CATEGORY_COUNT, UNASSIGNED_CODE};
pub use model::date::{DateParseError, DateStatus, LogDate};
pub use model::day_log::{DayHours, DayLog, DayLogId, DayLogValidationError, HOURS_IN_DAY};
pub use model::dream::{DreamRecord, DreamState};
pub use model::event::{EventId, NewNotableEvent, NotableEvent};
pub use model::summary::DailySummary;
pub use repo::day_log_repo::{DayLogRepository, RepoError, RepoResult, SqliteDayLogRepository};
pub use repo::dream_repo::{DreamRepository, SqliteDreamRepository};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::summary_repo::{SqliteSummaryRepository, SummaryRepository};
pub use service::dashboard_service::DashboardService;
pub use service::day_log_service::DayLogService;
pub use service::error::{ServiceError, ServiceResult};
pub use service::event_service::{EventService, EVENTS_DEFAULT_RANGE_DAYS};
pub use service::journal_service::{DreamResetOutcome, DreamService, SummaryService};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
