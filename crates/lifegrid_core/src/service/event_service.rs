//! Notable event use-case service.
//!
//! # Invariants
//! - Titles are trimmed and must not be blank.
//! - Category tags must be known codes when present.
//! - Listing without explicit bounds covers the last 30 days through today.

use crate::clock::Clock;
use crate::model::category::Category;
use crate::model::date::LogDate;
use crate::model::event::{EventId, NewNotableEvent, NotableEvent};
use crate::repo::event_repo::EventRepository;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::journal_service::{ensure_not_future, non_blank};
use log::info;

/// Days covered by a listing with no explicit start date.
pub const EVENTS_DEFAULT_RANGE_DAYS: u64 = 30;

pub struct EventService<R: EventRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: EventRepository, C: Clock> EventService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Lists events in `[start, end]`, newest first.
    ///
    /// `end` defaults to today, `start` to 29 days before `end`.
    pub fn list_events(
        &self,
        start: Option<LogDate>,
        end: Option<LogDate>,
    ) -> ServiceResult<Vec<NotableEvent>> {
        let end = end.unwrap_or_else(|| self.clock.today());
        let start = start.unwrap_or_else(|| end.days_before(EVENTS_DEFAULT_RANGE_DAYS - 1));
        if start > end {
            return Err(ServiceError::InvalidRange { start, end });
        }
        Ok(self.repo.list_events(start, end)?)
    }

    /// Records a new event.
    pub fn create_event(
        &self,
        date: LogDate,
        title: &str,
        description: Option<String>,
        category_code: Option<i64>,
    ) -> ServiceResult<NotableEvent> {
        ensure_not_future(date, self.clock.today(), "event_create")?;

        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::BlankTitle);
        }
        let category = category_code
            .map(|code| Category::from_code(code).ok_or(ServiceError::InvalidCategory(code)))
            .transpose()?;

        let created = self.repo.create_event(&NewNotableEvent {
            date,
            title: title.to_string(),
            description: non_blank(description),
            category,
        })?;
        info!(
            "event=event_create module=service status=ok date={} event_id={} category={}",
            date,
            created.id,
            category.map_or(-1, i64::from)
        );
        Ok(created)
    }

    pub fn delete_event(&self, id: EventId) -> ServiceResult<()> {
        self.repo.delete_event(id)?;
        info!("event=event_delete module=service status=ok event_id={}", id);
        Ok(())
    }
}
