//! Daily summary repository contracts and SQLite implementation.

use crate::model::date::LogDate;
use crate::model::summary::DailySummary;
use crate::repo::day_log_repo::{parse_date_column, parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub trait SummaryRepository {
    fn get_summary(&self, date: LogDate) -> RepoResult<Option<DailySummary>>;
    /// Inserts or replaces the summary for `summary.date` and returns the stored row.
    fn upsert_summary(&self, summary: &DailySummary) -> RepoResult<DailySummary>;
}

pub struct SqliteSummaryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSummaryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SummaryRepository for SqliteSummaryRepository<'_> {
    fn get_summary(&self, date: LogDate) -> RepoResult<Option<DailySummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, date, highlight, reflection
             FROM daily_summaries
             WHERE date = ?1;",
        )?;
        let mut rows = stmt.query([date.to_key()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_summary_row(row)?));
        }
        Ok(None)
    }

    fn upsert_summary(&self, summary: &DailySummary) -> RepoResult<DailySummary> {
        self.conn.execute(
            "INSERT INTO daily_summaries (uuid, date, highlight, reflection)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                highlight = excluded.highlight,
                reflection = excluded.reflection,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                summary.id.to_string(),
                summary.date.to_key(),
                summary.highlight.as_deref(),
                summary.reflection.as_deref(),
            ],
        )?;

        self.get_summary(summary.date)?.ok_or_else(|| {
            RepoError::InvalidData(format!("summary for {} missing after upsert", summary.date))
        })
    }
}

fn parse_summary_row(row: &Row<'_>) -> RepoResult<DailySummary> {
    Ok(DailySummary {
        id: parse_uuid_column(row, "daily_summaries")?,
        date: parse_date_column(row, "daily_summaries")?,
        highlight: row.get("highlight")?,
        reflection: row.get("reflection")?,
    })
}
