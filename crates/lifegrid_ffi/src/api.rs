//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Flatten core types into plain envelopes (strings, integers, vectors).
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.
//! - Hour slots and category tags cross as integer codes; `-1` is unassigned.
//! - Every failure is reported through `ok=false` plus a message.

use lifegrid_core::db::open_db;
use lifegrid_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CategoryCatalog, Config, DailySummary, DashboardService, DayLog, DayLogService, DreamRecord,
    DreamService, DreamState, EventService, LogDate, NotableEvent, SqliteDayLogRepository,
    SqliteDreamRepository, SqliteEventRepository, SqliteSummaryRepository, SummaryService,
    SystemClock, WeeklyDashboardResponse,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Display metadata for one hour category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub code: i64,
    pub name: String,
    pub icon: String,
    pub color_class: String,
}

/// Minimal success/failure envelope for commands without payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Stored hour grid for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLogItem {
    pub id: String,
    pub date: String,
    /// 24 category codes, `-1` for unassigned hours.
    pub hours: Vec<i64>,
    pub is_reconstructed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLogResponse {
    pub ok: bool,
    /// `None` when nothing is logged for the date or the call failed.
    pub item: Option<DayLogItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreamItem {
    pub id: String,
    pub date: String,
    /// `0` none, `1` unremembered, `2` remembered.
    pub dream_state: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreamResponse {
    pub ok: bool,
    pub item: Option<DreamItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreamResetResponse {
    pub ok: bool,
    /// `reset` or `no_record` on success, empty on failure.
    pub outcome: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub id: String,
    pub date: String,
    pub highlight: Option<String>,
    pub reflection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResponse {
    pub ok: bool,
    pub item: Option<SummaryItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub id: String,
    pub date: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<i64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventResponse {
    pub ok: bool,
    pub item: Option<EventItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub ok: bool,
    pub items: Vec<EventItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardDayItem {
    pub date: String,
    pub has_log: bool,
    /// Hours per category, indexed by category code.
    pub counts: Vec<u32>,
    pub tracked_hours: u32,
    pub unassigned_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotalItem {
    pub category_id: i64,
    pub hours: u32,
}

/// Flattened weekly dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyDashboardItem {
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DashboardDayItem>,
    pub total_tracked_hours: u32,
    pub average_sleep_hours: f64,
    pub logged_days: u32,
    pub category_totals: Vec<CategoryTotalItem>,
    pub most_frequent_category: Option<i64>,
    pub most_balanced_day: Option<String>,
    pub dream_days: u32,
    pub remembered_count: u32,
    pub unremembered_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub item: Option<WeeklyDashboardItem>,
    pub message: String,
}

/// Lists the fixed category taxonomy in code order.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_list() -> Vec<CategoryItem> {
    CategoryCatalog::standard()
        .entries()
        .iter()
        .map(|meta| CategoryItem {
            code: i64::from(meta.category),
            name: meta.name.to_string(),
            icon: meta.icon.to_string(),
            color_class: meta.color_class.to_string(),
        })
        .collect()
}

/// Loads the hour grid for `date`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `ok=true, item=None` when nothing is logged yet.
#[flutter_rust_bridge::frb(sync)]
pub fn day_log_get(date: String) -> DayLogResponse {
    let result = parse_date(&date).and_then(|date| {
        with_connection(|conn| {
            DayLogService::new(SqliteDayLogRepository::new(conn), SystemClock)
                .get_day_log(date)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(item) => DayLogResponse {
            ok: true,
            message: found_message(item.is_some(), "Day log loaded.", "No day log."),
            item: item.map(to_day_log_item),
        },
        Err(err) => DayLogResponse {
            ok: false,
            item: None,
            message: format!("day_log_get failed: {err}"),
        },
    }
}

/// Creates or replaces the hour grid for `date`.
///
/// `hours` must hold 24 codes in `-1..=11`.
#[flutter_rust_bridge::frb(sync)]
pub fn day_log_upsert(date: String, hours: Vec<i64>) -> DayLogResponse {
    let codes = hours.into_iter().map(Some).collect::<Vec<_>>();
    let result = parse_date(&date).and_then(|date| {
        with_connection(|conn| {
            DayLogService::new(SqliteDayLogRepository::new(conn), SystemClock)
                .upsert_day_log(date, &codes)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(log) => DayLogResponse {
            ok: true,
            item: Some(to_day_log_item(log)),
            message: "Day log saved.".to_string(),
        },
        Err(err) => DayLogResponse {
            ok: false,
            item: None,
            message: format!("day_log_upsert failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn dream_get(date: String) -> DreamResponse {
    let result = parse_date(&date).and_then(|date| {
        with_connection(|conn| {
            DreamService::new(SqliteDreamRepository::new(conn), SystemClock)
                .get_dream(date)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(item) => DreamResponse {
            ok: true,
            message: found_message(item.is_some(), "Dream loaded.", "No dream entry."),
            item: item.map(to_dream_item),
        },
        Err(err) => DreamResponse {
            ok: false,
            item: None,
            message: format!("dream_get failed: {err}"),
        },
    }
}

/// Creates or replaces the dream entry for `date`.
///
/// `description` is dropped unless a dream happened.
#[flutter_rust_bridge::frb(sync)]
pub fn dream_upsert(date: String, dream_state: i64, description: Option<String>) -> DreamResponse {
    let result = parse_date(&date).and_then(|date| {
        let state = DreamState::from_code(dream_state)
            .ok_or_else(|| format!("unknown dream state {dream_state}"))?;
        with_connection(|conn| {
            DreamService::new(SqliteDreamRepository::new(conn), SystemClock)
                .upsert_dream(date, state, description)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(record) => DreamResponse {
            ok: true,
            item: Some(to_dream_item(record)),
            message: "Dream saved.".to_string(),
        },
        Err(err) => DreamResponse {
            ok: false,
            item: None,
            message: format!("dream_upsert failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn dream_reset(date: String) -> DreamResetResponse {
    let result = parse_date(&date).and_then(|date| {
        with_connection(|conn| {
            DreamService::new(SqliteDreamRepository::new(conn), SystemClock)
                .reset_dream(date)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(outcome) => DreamResetResponse {
            ok: true,
            outcome: outcome.as_str().to_string(),
            message: "Dream reset.".to_string(),
        },
        Err(err) => DreamResetResponse {
            ok: false,
            outcome: String::new(),
            message: format!("dream_reset failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn summary_get(date: String) -> SummaryResponse {
    let result = parse_date(&date).and_then(|date| {
        with_connection(|conn| {
            SummaryService::new(SqliteSummaryRepository::new(conn), SystemClock)
                .get_summary(date)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(item) => SummaryResponse {
            ok: true,
            message: found_message(item.is_some(), "Summary loaded.", "No summary."),
            item: item.map(to_summary_item),
        },
        Err(err) => SummaryResponse {
            ok: false,
            item: None,
            message: format!("summary_get failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn summary_upsert(
    date: String,
    highlight: Option<String>,
    reflection: Option<String>,
) -> SummaryResponse {
    let result = parse_date(&date).and_then(|date| {
        with_connection(|conn| {
            SummaryService::new(SqliteSummaryRepository::new(conn), SystemClock)
                .upsert_summary(date, highlight, reflection)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(summary) => SummaryResponse {
            ok: true,
            item: Some(to_summary_item(summary)),
            message: "Summary saved.".to_string(),
        },
        Err(err) => SummaryResponse {
            ok: false,
            item: None,
            message: format!("summary_upsert failed: {err}"),
        },
    }
}

/// Lists events newest first. Missing bounds default to the last 30 days.
#[flutter_rust_bridge::frb(sync)]
pub fn events_list(start_date: Option<String>, end_date: Option<String>) -> EventListResponse {
    let result = parse_optional_date(start_date.as_deref()).and_then(|start| {
        let end = parse_optional_date(end_date.as_deref())?;
        with_connection(|conn| {
            EventService::new(SqliteEventRepository::new(conn), SystemClock)
                .list_events(start, end)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(events) => {
            let items = events.into_iter().map(to_event_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No events.".to_string()
            } else {
                format!("Found {} event(s).", items.len())
            };
            EventListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => EventListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("events_list failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn event_create(
    date: String,
    title: String,
    description: Option<String>,
    category: Option<i64>,
) -> EventResponse {
    let result = parse_date(&date).and_then(|date| {
        with_connection(|conn| {
            EventService::new(SqliteEventRepository::new(conn), SystemClock)
                .create_event(date, &title, description, category)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(event) => EventResponse {
            ok: true,
            item: Some(to_event_item(event)),
            message: "Event created.".to_string(),
        },
        Err(err) => EventResponse {
            ok: false,
            item: None,
            message: format!("event_create failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn event_delete(event_id: String) -> ActionResponse {
    let result = Uuid::parse_str(event_id.trim())
        .map_err(|err| format!("invalid event id `{}`: {err}", event_id.trim()))
        .and_then(|id| {
            with_connection(|conn| {
                EventService::new(SqliteEventRepository::new(conn), SystemClock)
                    .delete_event(id)
                    .map_err(|err| err.to_string())
            })
        });
    match result {
        Ok(()) => ActionResponse {
            ok: true,
            message: "Event deleted.".to_string(),
        },
        Err(err) => ActionResponse {
            ok: false,
            message: format!("event_delete failed: {err}"),
        },
    }
}

/// Computes the 7-day dashboard ending at `end_date` (today when `None`).
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_weekly(end_date: Option<String>) -> DashboardResponse {
    let result = parse_optional_date(end_date.as_deref()).and_then(|end| {
        with_connection(|conn| {
            let service = DashboardService::new(
                SqliteDayLogRepository::new(conn),
                SqliteDreamRepository::new(conn),
                SystemClock,
            );
            let dashboard = match end {
                Some(end) => service.weekly_dashboard_ending(end),
                None => service.weekly_dashboard(),
            };
            dashboard.map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(dashboard) => DashboardResponse {
            ok: true,
            item: Some(to_dashboard_item(dashboard)),
            message: "Dashboard computed.".to_string(),
        },
        Err(err) => DashboardResponse {
            ok: false,
            item: None,
            message: format!("dashboard_weekly failed: {err}"),
        },
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH.get_or_init(|| Config::from_env().db_path).clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("DB open failed: {err}")
    })?;
    f(&conn)
}

fn parse_date(value: &str) -> Result<LogDate, String> {
    LogDate::parse(value.trim()).map_err(|err| err.to_string())
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<LogDate>, String> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(parse_date)
        .transpose()
}

fn found_message(found: bool, hit: &str, miss: &str) -> String {
    let message = if found { hit } else { miss };
    message.to_string()
}

fn to_day_log_item(log: DayLog) -> DayLogItem {
    DayLogItem {
        id: log.id.to_string(),
        date: log.date.to_key(),
        hours: log.hours.to_codes(),
        is_reconstructed: log.is_reconstructed,
    }
}

fn to_dream_item(record: DreamRecord) -> DreamItem {
    DreamItem {
        id: record.id.to_string(),
        date: record.date.to_key(),
        dream_state: record.dream_state.code(),
        description: record.description,
    }
}

fn to_summary_item(summary: DailySummary) -> SummaryItem {
    SummaryItem {
        id: summary.id.to_string(),
        date: summary.date.to_key(),
        highlight: summary.highlight,
        reflection: summary.reflection,
    }
}

fn to_event_item(event: NotableEvent) -> EventItem {
    EventItem {
        id: event.id.to_string(),
        date: event.date.to_key(),
        title: event.title,
        description: event.description,
        category: event.category.map(i64::from),
        created_at: event.created_at,
    }
}

fn to_dashboard_item(dashboard: WeeklyDashboardResponse) -> WeeklyDashboardItem {
    WeeklyDashboardItem {
        start_date: dashboard.start_date.to_key(),
        end_date: dashboard.end_date.to_key(),
        days: dashboard
            .days
            .into_iter()
            .map(|day| DashboardDayItem {
                date: day.date.to_key(),
                has_log: day.has_log,
                counts: day.counts.to_vec(),
                tracked_hours: day.tracked_hours,
                unassigned_hours: day.unassigned_hours,
            })
            .collect(),
        total_tracked_hours: dashboard.total_tracked_hours,
        average_sleep_hours: dashboard.average_sleep_hours,
        logged_days: dashboard.logged_days,
        category_totals: dashboard
            .category_totals
            .into_iter()
            .map(|total| CategoryTotalItem {
                category_id: i64::from(total.category_id),
                hours: total.hours,
            })
            .collect(),
        most_frequent_category: dashboard.insights.most_frequent_category.map(i64::from),
        most_balanced_day: dashboard.insights.most_balanced_day.map(LogDate::to_key),
        dream_days: dashboard.dreams.dream_days,
        remembered_count: dashboard.dreams.remembered_count,
        unremembered_count: dashboard.dreams.unremembered_count,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        categories_list, core_version, dashboard_weekly, day_log_get, day_log_upsert,
        dream_reset, dream_upsert, event_create, event_delete, events_list, init_logging, ping,
        summary_get, summary_upsert,
    };
    use lifegrid_core::{Clock, LogDate, SystemClock};

    fn days_ago(days: u64) -> String {
        SystemClock.today().days_before(days).to_key()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn categories_list_is_code_ordered() {
        let categories = categories_list();
        assert_eq!(categories.len(), 12);
        assert_eq!(categories[0].name, "Sleep");
        assert!(categories
            .iter()
            .enumerate()
            .all(|(index, item)| item.code == index as i64));
    }

    #[test]
    fn day_log_upsert_then_get_round_trips() {
        let date = days_ago(400);
        let mut hours = vec![-1_i64; 24];
        hours[0] = 0;
        hours[10] = 1;

        let saved = day_log_upsert(date.clone(), hours.clone());
        assert!(saved.ok, "{}", saved.message);
        let item = saved.item.expect("saved log should be returned");
        assert!(item.is_reconstructed);

        let loaded = day_log_get(date);
        assert!(loaded.ok, "{}", loaded.message);
        assert_eq!(loaded.item.expect("log should exist").hours, hours);
    }

    #[test]
    fn day_log_upsert_reports_validation_errors() {
        let short = day_log_upsert(days_ago(401), vec![0; 3]);
        assert!(!short.ok);
        assert!(short.item.is_none());

        let tomorrow = SystemClock.today().days_after(1).to_key();
        let future = day_log_upsert(tomorrow, vec![0; 24]);
        assert!(!future.ok);
        assert!(future.message.contains("future"));

        let malformed = day_log_get("2025-13-01".to_string());
        assert!(!malformed.ok);
    }

    #[test]
    fn dream_upsert_and_reset() {
        let date = days_ago(402);
        let saved = dream_upsert(date.clone(), 2, Some("rain".to_string()));
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(
            saved.item.expect("dream should be returned").description.as_deref(),
            Some("rain")
        );

        let reset = dream_reset(date);
        assert!(reset.ok, "{}", reset.message);
        assert_eq!(reset.outcome, "reset");

        let unknown = dream_upsert(days_ago(402), 5, None);
        assert!(!unknown.ok);
    }

    #[test]
    fn summary_upsert_then_get() {
        let date = days_ago(403);
        let saved = summary_upsert(date.clone(), Some("hike".to_string()), None);
        assert!(saved.ok, "{}", saved.message);

        let loaded = summary_get(date);
        let item = loaded.item.expect("summary should exist");
        assert_eq!(item.highlight.as_deref(), Some("hike"));
        assert_eq!(item.reflection, None);
    }

    #[test]
    fn event_create_list_delete() {
        let date = days_ago(404);
        let created = event_create(date.clone(), "Graduation".to_string(), None, Some(8));
        assert!(created.ok, "{}", created.message);
        let id = created.item.expect("event should be returned").id;

        let listed = events_list(Some(date.clone()), Some(date.clone()));
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.iter().any(|item| item.id == id));

        assert!(event_delete(id.clone()).ok);
        let again = event_delete(id);
        assert!(!again.ok);
        assert!(!event_delete("not-a-uuid".to_string()).ok);

        let inverted = events_list(Some(date), Some(days_ago(405)));
        assert!(!inverted.ok);
    }

    #[test]
    fn dashboard_weekly_reflects_logged_day() {
        let end = SystemClock.today().days_before(410);
        let logged = end.days_before(2).to_key();
        let saved = day_log_upsert(logged.clone(), vec![0; 24]);
        assert!(saved.ok, "{}", saved.message);

        let response = dashboard_weekly(Some(end.to_key()));
        assert!(response.ok, "{}", response.message);
        let item = response.item.expect("dashboard should be returned");
        assert_eq!(item.days.len(), 7);
        assert_eq!(item.end_date, end.to_key());
        let day = item
            .days
            .iter()
            .find(|day| day.date == logged)
            .expect("logged day should be in window");
        assert!(day.has_log);
        assert_eq!(day.counts[0], 24);

        let invalid = dashboard_weekly(Some("yesterday".to_string()));
        assert!(!invalid.ok);
        assert!(LogDate::parse(&item.start_date).is_ok());
    }
}
