//! Dream repository contracts and SQLite implementation.
//!
//! # Invariants
//! - At most one dream row per date; upserts keep the existing row id.
//! - Stored states outside `0..=2` are rejected on read.

use crate::model::date::LogDate;
use crate::model::dream::{DreamRecord, DreamState};
use crate::repo::day_log_repo::{parse_date_column, parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const DREAM_SELECT_SQL: &str = "SELECT
    uuid,
    date,
    dream_state,
    description
FROM dreams";

/// Repository interface for dream records.
pub trait DreamRepository {
    fn get_dream(&self, date: LogDate) -> RepoResult<Option<DreamRecord>>;
    /// Inserts or replaces the dream for `record.date` and returns the stored row.
    fn upsert_dream(&self, record: &DreamRecord) -> RepoResult<DreamRecord>;
    /// Resets an existing row to `DreamState::None`. Returns `false` when no row exists.
    fn reset_dream(&self, date: LogDate) -> RepoResult<bool>;
    /// Lists dreams with `start <= date <= end`, oldest first.
    fn list_dreams(&self, start: LogDate, end: LogDate) -> RepoResult<Vec<DreamRecord>>;
}

pub struct SqliteDreamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDreamRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DreamRepository for SqliteDreamRepository<'_> {
    fn get_dream(&self, date: LogDate) -> RepoResult<Option<DreamRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DREAM_SELECT_SQL} WHERE date = ?1;"))?;
        let mut rows = stmt.query([date.to_key()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_dream_row(row)?));
        }
        Ok(None)
    }

    fn upsert_dream(&self, record: &DreamRecord) -> RepoResult<DreamRecord> {
        self.conn.execute(
            "INSERT INTO dreams (uuid, date, dream_state, description)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                dream_state = excluded.dream_state,
                description = excluded.description,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                record.id.to_string(),
                record.date.to_key(),
                record.dream_state.code(),
                record.description.as_deref(),
            ],
        )?;

        self.get_dream(record.date)?.ok_or_else(|| {
            RepoError::InvalidData(format!("dream for {} missing after upsert", record.date))
        })
    }

    fn reset_dream(&self, date: LogDate) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE dreams
             SET
                dream_state = ?2,
                description = NULL,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE date = ?1;",
            params![date.to_key(), DreamState::None.code()],
        )?;
        Ok(changed > 0)
    }

    fn list_dreams(&self, start: LogDate, end: LogDate) -> RepoResult<Vec<DreamRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DREAM_SELECT_SQL}
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date ASC;"
        ))?;
        let mut rows = stmt.query([start.to_key(), end.to_key()])?;
        let mut dreams = Vec::new();
        while let Some(row) = rows.next()? {
            dreams.push(parse_dream_row(row)?);
        }
        Ok(dreams)
    }
}

fn parse_dream_row(row: &Row<'_>) -> RepoResult<DreamRecord> {
    let state_code: i64 = row.get("dream_state")?;
    let dream_state = DreamState::from_code(state_code).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid dream state `{state_code}` in dreams.dream_state"
        ))
    })?;

    Ok(DreamRecord {
        id: parse_uuid_column(row, "dreams")?,
        date: parse_date_column(row, "dreams")?,
        dream_state,
        description: row.get("description")?,
    })
}
