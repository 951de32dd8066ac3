use lifegrid_core::db::open_db_in_memory;
use lifegrid_core::{
    Category, DashboardService, DayLogService, DreamService, DreamState, FixedClock, LogDate,
    ServiceError, SqliteDayLogRepository, SqliteDreamRepository, WindowError, HOURS_IN_DAY,
};
use rusqlite::{params, Connection};

const TODAY: &str = "2025-06-07";

fn date(value: &str) -> LogDate {
    LogDate::parse(value).unwrap()
}

fn clock() -> FixedClock {
    FixedClock(date(TODAY))
}

fn log_day(conn: &Connection, day: &str, codes: &[Option<i64>]) {
    DayLogService::new(SqliteDayLogRepository::new(conn), clock())
        .upsert_day_log(date(day), codes)
        .unwrap();
}

fn all_sleep() -> Vec<Option<i64>> {
    vec![Some(0); HOURS_IN_DAY]
}

fn two_hours_each() -> Vec<Option<i64>> {
    (0..HOURS_IN_DAY).map(|hour| Some(hour as i64 / 2)).collect()
}

type SqliteDashboard<'conn> =
    DashboardService<SqliteDayLogRepository<'conn>, SqliteDreamRepository<'conn>, FixedClock>;

fn dashboard(conn: &Connection) -> SqliteDashboard<'_> {
    DashboardService::new(
        SqliteDayLogRepository::new(conn),
        SqliteDreamRepository::new(conn),
        clock(),
    )
}

#[test]
fn empty_database_yields_zeroed_week() {
    let conn = open_db_in_memory().unwrap();
    let result = dashboard(&conn).weekly_dashboard().unwrap();

    assert_eq!(result.start_date, date("2025-06-01"));
    assert_eq!(result.end_date, date(TODAY));
    assert_eq!(result.days.len(), 7);
    assert!(result.days.iter().all(|day| !day.has_log));
    assert_eq!(result.logged_days, 0);
    assert_eq!(result.total_tracked_hours, 0);
    assert_eq!(result.average_sleep_hours, 0.0);
    assert!(result.category_totals.is_empty());
    assert_eq!(result.insights.most_frequent_category, None);
    assert_eq!(result.insights.most_balanced_day, None);
    assert_eq!(result.dreams.dream_days, 0);
}

#[test]
fn sleep_heavy_and_balanced_days() {
    let conn = open_db_in_memory().unwrap();
    log_day(&conn, "2025-06-03", &all_sleep());
    log_day(&conn, "2025-06-04", &two_hours_each());

    let result = dashboard(&conn).weekly_dashboard().unwrap();

    assert_eq!(result.logged_days, 2);
    assert_eq!(result.total_tracked_hours, 48);
    assert_eq!(result.average_sleep_hours, 13.0);
    assert_eq!(result.insights.average_sleep_hours, 13.0);
    assert_eq!(result.insights.most_frequent_category, Some(Category::Sleep));
    assert_eq!(result.insights.most_balanced_day, Some(date("2025-06-04")));
    assert_eq!(result.category_totals[0].category_id, Category::Sleep);
    assert_eq!(result.category_totals[0].hours, 26);
    assert_eq!(result.category_totals.len(), 12);
}

#[test]
fn missing_day_contributes_nothing() {
    let conn = open_db_in_memory().unwrap();
    for day in [
        "2025-06-01",
        "2025-06-02",
        "2025-06-03",
        "2025-06-05",
        "2025-06-06",
        "2025-06-07",
    ] {
        log_day(&conn, day, &two_hours_each());
    }

    let result = dashboard(&conn).weekly_dashboard().unwrap();
    assert_eq!(result.logged_days, 6);
    assert_eq!(result.total_tracked_hours, 6 * 24);

    let missing = &result.days[3];
    assert_eq!(missing.date, date("2025-06-04"));
    assert!(!missing.has_log);
    assert_eq!(missing.tracked_hours, 0);
    assert_eq!(missing.unassigned_hours, 0);
}

#[test]
fn partially_logged_day_counts_unassigned_hours() {
    let conn = open_db_in_memory().unwrap();
    let mut codes = vec![None; HOURS_IN_DAY];
    codes[..8].fill(Some(0));
    codes[9..15].fill(Some(1));
    log_day(&conn, "2025-06-06", &codes);

    let result = dashboard(&conn).weekly_dashboard().unwrap();
    let day = &result.days[5];
    assert!(day.has_log);
    assert_eq!(day.tracked_hours, 14);
    assert_eq!(day.unassigned_hours, 10);
    assert_eq!(day.counts[Category::Work.index()], 6);
    assert_eq!(result.average_sleep_hours, 8.0);
}

#[test]
fn corrupt_stored_codes_count_as_unassigned() {
    let conn = open_db_in_memory().unwrap();
    let mut stored = vec![2_i64; HOURS_IN_DAY];
    stored[..4].fill(77);
    conn.execute(
        "INSERT INTO day_logs (uuid, date, hours, is_reconstructed) VALUES (?1, ?2, ?3, 1);",
        params![
            "11111111-2222-4333-8444-555555555555",
            "2025-06-02",
            serde_json::to_string(&stored).unwrap()
        ],
    )
    .unwrap();

    let result = dashboard(&conn).weekly_dashboard().unwrap();
    let day = &result.days[1];
    assert_eq!(day.tracked_hours, 20);
    assert_eq!(day.unassigned_hours, 4);
    assert_eq!(
        result.insights.most_frequent_category,
        Some(Category::LearningBuilding)
    );
}

#[test]
fn null_stored_slots_count_as_unassigned() {
    let conn = open_db_in_memory().unwrap();
    let mut stored = vec![serde_json::json!(0); HOURS_IN_DAY];
    stored[5] = serde_json::Value::Null;
    conn.execute(
        "INSERT INTO day_logs (uuid, date, hours, is_reconstructed) VALUES (?1, ?2, ?3, 1);",
        params![
            "11111111-2222-4333-8444-555555555555",
            "2025-06-05",
            serde_json::to_string(&stored).unwrap()
        ],
    )
    .unwrap();

    let result = dashboard(&conn).weekly_dashboard().unwrap();
    let day = result
        .days
        .iter()
        .find(|day| day.date == date("2025-06-05"))
        .unwrap();
    assert!(day.has_log);
    assert_eq!(day.tracked_hours, 23);
    assert_eq!(day.unassigned_hours, 1);
    assert_eq!(day.counts[Category::Sleep.index()], 23);
    assert_eq!(result.logged_days, 1);
}

#[test]
fn dream_metrics_only_count_dreams_in_window() {
    let conn = open_db_in_memory().unwrap();
    let dreams = DreamService::new(SqliteDreamRepository::new(&conn), clock());
    dreams
        .upsert_dream(date("2025-05-31"), DreamState::Remembered, None)
        .unwrap();
    dreams
        .upsert_dream(date("2025-06-01"), DreamState::Remembered, Some("sea".to_string()))
        .unwrap();
    dreams
        .upsert_dream(date("2025-06-02"), DreamState::Unremembered, None)
        .unwrap();
    dreams
        .upsert_dream(date("2025-06-03"), DreamState::None, None)
        .unwrap();

    let result = dashboard(&conn).weekly_dashboard().unwrap();
    assert_eq!(result.dreams.dream_days, 2);
    assert_eq!(result.dreams.remembered_count, 1);
    assert_eq!(result.dreams.unremembered_count, 1);
    assert_eq!(result.logged_days, 0);
}

#[test]
fn explicit_window_must_span_seven_days() {
    let conn = open_db_in_memory().unwrap();
    let service = dashboard(&conn);

    let ok = service
        .weekly_dashboard_between(date("2025-05-01"), date("2025-05-07"))
        .unwrap();
    assert_eq!(ok.days.len(), 7);

    let err = service
        .weekly_dashboard_between(date("2025-05-01"), date("2025-05-09"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Window(WindowError::WrongSpan { .. })));

    let err = service
        .weekly_dashboard_between(date("2025-05-09"), date("2025-05-01"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Window(WindowError::StartAfterEnd { .. })
    ));
}

#[test]
fn window_can_end_in_the_past() {
    let conn = open_db_in_memory().unwrap();
    log_day(&conn, "2025-05-20", &all_sleep());
    log_day(&conn, "2025-06-07", &two_hours_each());

    let result = dashboard(&conn)
        .weekly_dashboard_ending(date("2025-05-22"))
        .unwrap();
    assert_eq!(result.start_date, date("2025-05-16"));
    assert_eq!(result.logged_days, 1);
    assert_eq!(result.average_sleep_hours, 24.0);
}

#[test]
fn response_serializes_with_wire_field_names() {
    let conn = open_db_in_memory().unwrap();
    log_day(&conn, "2025-06-07", &two_hours_each());

    let json = serde_json::to_value(dashboard(&conn).weekly_dashboard().unwrap()).unwrap();
    assert_eq!(json["start_date"], "2025-06-01");
    assert_eq!(json["end_date"], TODAY);
    assert_eq!(json["days"].as_array().unwrap().len(), 7);
    assert_eq!(json["days"][6]["counts"].as_array().unwrap().len(), 12);
    assert_eq!(json["category_totals"][0]["category_id"], 0);
    assert_eq!(json["category_totals"][0]["hours"], 2);
    assert_eq!(json["insights"]["most_frequent_category"], 0);
    assert_eq!(json["insights"]["most_balanced_day"], TODAY);
    assert_eq!(json["dreams"]["dream_days"], 0);
}
