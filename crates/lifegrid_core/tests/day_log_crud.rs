use lifegrid_core::db::open_db_in_memory;
use lifegrid_core::{
    Category, DateStatus, DayHours, DayLog, DayLogRepository, DayLogService,
    DayLogValidationError, FixedClock, LogDate, RepoError, ServiceError, SqliteDayLogRepository,
    HOURS_IN_DAY,
};
use rusqlite::params;

fn date(value: &str) -> LogDate {
    LogDate::parse(value).unwrap()
}

fn clock() -> FixedClock {
    FixedClock(date("2025-04-10"))
}

fn codes(value: i64) -> Vec<Option<i64>> {
    vec![Some(value); HOURS_IN_DAY]
}

#[test]
fn get_returns_none_when_nothing_logged() {
    let conn = open_db_in_memory().unwrap();
    let service = DayLogService::new(SqliteDayLogRepository::new(&conn), clock());

    assert!(service.get_day_log(date("2025-04-10")).unwrap().is_none());
}

#[test]
fn upsert_creates_then_updates_same_row() {
    let conn = open_db_in_memory().unwrap();
    let service = DayLogService::new(SqliteDayLogRepository::new(&conn), clock());
    let day = date("2025-04-10");

    let created = service.upsert_day_log(day, &codes(1)).unwrap();
    assert_eq!(created.date, day);
    assert_eq!(created.hours.counts()[Category::Work.index()], 24);

    let mut next = codes(0);
    next[23] = None;
    let updated = service.upsert_day_log(day, &next).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.hours.get(23), None);
    assert_eq!(updated.hours.tracked_hours(), 23);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM day_logs;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn hours_are_stored_as_wire_codes() {
    let conn = open_db_in_memory().unwrap();
    let service = DayLogService::new(SqliteDayLogRepository::new(&conn), clock());
    let mut input = codes(-1);
    input[0] = Some(11);
    input[1] = None;

    service.upsert_day_log(date("2025-04-09"), &input).unwrap();

    let stored: String = conn
        .query_row(
            "SELECT hours FROM day_logs WHERE date = '2025-04-09';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let decoded: Vec<i64> = serde_json::from_str(&stored).unwrap();
    assert_eq!(decoded[0], 11);
    assert_eq!(decoded[1], -1);
    assert_eq!(decoded.len(), HOURS_IN_DAY);
}

#[test]
fn future_dates_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = DayLogService::new(SqliteDayLogRepository::new(&conn), clock());

    let err = service
        .upsert_day_log(date("2025-04-11"), &codes(0))
        .unwrap_err();
    assert!(matches!(err, ServiceError::FutureDate(d) if d == date("2025-04-11")));
}

#[test]
fn strict_validation_rejects_bad_arrays() {
    let conn = open_db_in_memory().unwrap();
    let service = DayLogService::new(SqliteDayLogRepository::new(&conn), clock());

    let err = service
        .upsert_day_log(date("2025-04-10"), &codes(0)[..20])
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(DayLogValidationError::WrongLength(20))
    ));

    let mut bad = codes(0);
    bad[5] = Some(12);
    let err = service.upsert_day_log(date("2025-04-10"), &bad).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(DayLogValidationError::InvalidCode { hour: 5, code: 12 })
    ));
}

#[test]
fn reconstructed_flag_follows_live_window() {
    let conn = open_db_in_memory().unwrap();
    let service = DayLogService::new(SqliteDayLogRepository::new(&conn), clock());

    let today = service.upsert_day_log(date("2025-04-10"), &codes(0)).unwrap();
    let yesterday = service.upsert_day_log(date("2025-04-09"), &codes(0)).unwrap();
    let older = service.upsert_day_log(date("2025-04-08"), &codes(0)).unwrap();

    assert!(!today.is_reconstructed);
    assert!(!yesterday.is_reconstructed);
    assert!(older.is_reconstructed);
    assert_eq!(service.date_status(date("2025-04-08")), DateStatus::Reconstructed);
}

#[test]
fn reconstructed_flag_is_recomputed_on_rewrite() {
    let conn = open_db_in_memory().unwrap();
    let day = date("2025-04-09");
    {
        let service = DayLogService::new(SqliteDayLogRepository::new(&conn), FixedClock(day));
        assert!(!service.upsert_day_log(day, &codes(0)).unwrap().is_reconstructed);
    }

    let later = DayLogService::new(
        SqliteDayLogRepository::new(&conn),
        FixedClock(date("2025-04-20")),
    );
    assert!(later.upsert_day_log(day, &codes(0)).unwrap().is_reconstructed);
}

#[test]
fn list_by_range_is_inclusive_and_sorted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDayLogRepository::new(&conn);
    for day in ["2025-04-03", "2025-04-01", "2025-04-05", "2025-04-02"] {
        repo.upsert_day_log(&DayLog::new(date(day), DayHours::unassigned(), true))
            .unwrap();
    }

    let listed = repo
        .list_day_logs(date("2025-04-02"), date("2025-04-03"))
        .unwrap();
    let dates = listed.iter().map(|log| log.date.to_key()).collect::<Vec<_>>();
    assert_eq!(dates, vec!["2025-04-02", "2025-04-03"]);
}

#[test]
fn unknown_stored_codes_read_back_as_unassigned() {
    let conn = open_db_in_memory().unwrap();
    let mut stored = vec![4_i64; HOURS_IN_DAY];
    stored[0] = 42;
    stored[1] = -9;
    conn.execute(
        "INSERT INTO day_logs (uuid, date, hours, is_reconstructed) VALUES (?1, ?2, ?3, 0);",
        params![
            "11111111-2222-4333-8444-555555555555",
            "2025-04-07",
            serde_json::to_string(&stored).unwrap()
        ],
    )
    .unwrap();

    let repo = SqliteDayLogRepository::new(&conn);
    let log = repo.get_day_log(date("2025-04-07")).unwrap().unwrap();
    assert_eq!(log.hours.get(0), None);
    assert_eq!(log.hours.get(1), None);
    assert_eq!(log.hours.tracked_hours(), 22);
}

#[test]
fn structurally_invalid_rows_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO day_logs (uuid, date, hours, is_reconstructed) VALUES (?1, ?2, ?3, 0);",
        params!["11111111-2222-4333-8444-555555555555", "2025-04-07", "[0, 1, 2]"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO day_logs (uuid, date, hours, is_reconstructed) VALUES (?1, ?2, ?3, 0);",
        params!["not-a-uuid", "2025-04-06", "[]"],
    )
    .unwrap();

    let repo = SqliteDayLogRepository::new(&conn);
    let short = repo.get_day_log(date("2025-04-07")).unwrap_err();
    assert!(matches!(short, RepoError::InvalidData(message) if message.contains("24")));
    let bad_id = repo.get_day_log(date("2025-04-06")).unwrap_err();
    assert!(matches!(bad_id, RepoError::InvalidData(message) if message.contains("uuid")));
}

#[test]
fn day_log_serializes_with_wire_field_names() {
    let mut hours = DayHours::unassigned();
    hours.set(2, Some(Category::Family));
    let log = DayLog::new(date("2025-04-01"), hours, true);

    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(json["date"], "2025-04-01");
    assert_eq!(json["is_reconstructed"], true);
    assert_eq!(json["hours"][0], -1);
    assert_eq!(json["hours"][2], 8);
    assert_eq!(json["hours"].as_array().unwrap().len(), HOURS_IN_DAY);
}
