//! Notable event repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Listing order is `date DESC`, then newest insert first.
//! - Unknown stored category tags read back as `None`.

use crate::model::category::Category;
use crate::model::date::LogDate;
use crate::model::event::{EventId, NewNotableEvent, NotableEvent};
use crate::repo::day_log_repo::{parse_date_column, parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const EVENT_SELECT_SQL: &str = "SELECT
    uuid,
    date,
    title,
    description,
    category,
    created_at
FROM notable_events";

pub trait EventRepository {
    fn create_event(&self, event: &NewNotableEvent) -> RepoResult<NotableEvent>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<NotableEvent>>;
    /// Lists events with `start <= date <= end`, newest first.
    fn list_events(&self, start: LogDate, end: LogDate) -> RepoResult<Vec<NotableEvent>>;
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
}

pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &NewNotableEvent) -> RepoResult<NotableEvent> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO notable_events (uuid, date, title, description, category)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id.to_string(),
                event.date.to_key(),
                event.title.as_str(),
                event.description.as_deref(),
                event.category.map(i64::from),
            ],
        )?;

        self.get_event(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("event {id} missing after insert")))
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<NotableEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn list_events(&self, start: LogDate, end: LogDate) -> RepoResult<Vec<NotableEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL}
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date DESC, created_at DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([start.to_key(), end.to_key()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notable_events WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<NotableEvent> {
    let category = row
        .get::<_, Option<i64>>("category")?
        .and_then(Category::from_code);

    Ok(NotableEvent {
        id: parse_uuid_column(row, "notable_events")?,
        date: parse_date_column(row, "notable_events")?,
        title: row.get("title")?,
        description: row.get("description")?,
        category,
        created_at: row.get("created_at")?,
    })
}
