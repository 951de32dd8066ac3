//! Day log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide fetch-by-date, upsert-by-date and list-by-range over `day_logs`.
//! - Own the shared repository error type and row decoding helpers.
//!
//! # Invariants
//! - At most one row per date; upserts keep the existing row id.
//! - Read paths reject structurally invalid rows (bad uuid/date, hour arrays
//!   not of length 24) instead of masking them.
//! - Unknown category codes and `null` slots inside a stored hour array read
//!   back as unassigned.

use crate::db::DbError;
use crate::model::category::{Category, UNASSIGNED_CODE};
use crate::model::date::LogDate;
use crate::model::day_log::{DayHours, DayLog};
use log::warn;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DAY_LOG_SELECT_SQL: &str = "SELECT
    uuid,
    date,
    hours,
    is_reconstructed
FROM day_logs";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all LifeGrid stores.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for day logs.
pub trait DayLogRepository {
    fn get_day_log(&self, date: LogDate) -> RepoResult<Option<DayLog>>;
    /// Inserts or replaces the log for `log.date` and returns the stored row.
    fn upsert_day_log(&self, log: &DayLog) -> RepoResult<DayLog>;
    /// Lists logs with `start <= date <= end`, oldest first.
    fn list_day_logs(&self, start: LogDate, end: LogDate) -> RepoResult<Vec<DayLog>>;
}

/// SQLite-backed day log repository.
pub struct SqliteDayLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDayLogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DayLogRepository for SqliteDayLogRepository<'_> {
    fn get_day_log(&self, date: LogDate) -> RepoResult<Option<DayLog>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DAY_LOG_SELECT_SQL} WHERE date = ?1;"))?;
        let mut rows = stmt.query([date.to_key()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_day_log_row(row)?));
        }
        Ok(None)
    }

    fn upsert_day_log(&self, log: &DayLog) -> RepoResult<DayLog> {
        let hours_json = serde_json::to_string(&log.hours.to_codes())
            .map_err(|err| RepoError::InvalidData(format!("cannot encode hours: {err}")))?;

        self.conn.execute(
            "INSERT INTO day_logs (uuid, date, hours, is_reconstructed)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                hours = excluded.hours,
                is_reconstructed = excluded.is_reconstructed,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                log.id.to_string(),
                log.date.to_key(),
                hours_json,
                bool_to_int(log.is_reconstructed),
            ],
        )?;

        self.get_day_log(log.date)?.ok_or_else(|| {
            RepoError::InvalidData(format!("day log for {} missing after upsert", log.date))
        })
    }

    fn list_day_logs(&self, start: LogDate, end: LogDate) -> RepoResult<Vec<DayLog>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DAY_LOG_SELECT_SQL}
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date ASC;"
        ))?;
        let mut rows = stmt.query([start.to_key(), end.to_key()])?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next()? {
            logs.push(parse_day_log_row(row)?);
        }
        Ok(logs)
    }
}

fn parse_day_log_row(row: &Row<'_>) -> RepoResult<DayLog> {
    let id = parse_uuid_column(row, "day_logs")?;
    let date = parse_date_column(row, "day_logs")?;

    let hours_text: String = row.get("hours")?;
    let codes: Vec<Option<i64>> = serde_json::from_str(&hours_text).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid hours `{hours_text}` in day_logs.hours for {date}: {err}"
        ))
    })?;
    let hours = DayHours::from_codes_lenient(&codes)
        .map_err(|err| RepoError::InvalidData(format!("day_logs.hours for {date}: {err}")))?;

    let normalized = codes
        .iter()
        .flatten()
        .filter(|code| **code != UNASSIGNED_CODE && Category::from_code(**code).is_none())
        .count();
    if normalized > 0 {
        warn!(
            "event=day_log_normalize module=repo status=ok date={} unknown_codes={}",
            date, normalized
        );
    }

    Ok(DayLog {
        id,
        date,
        hours,
        is_reconstructed: parse_bool_column(row, "day_logs", "is_reconstructed")?,
    })
}

pub(crate) fn parse_uuid_column(row: &Row<'_>, table: &str) -> RepoResult<Uuid> {
    let text: String = row.get("uuid")?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.uuid")))
}

pub(crate) fn parse_date_column(row: &Row<'_>, table: &str) -> RepoResult<LogDate> {
    let text: String = row.get("date")?;
    LogDate::parse(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid date value `{text}` in {table}.date")))
}

pub(crate) fn parse_bool_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {table}.{column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
