//! Dream and daily summary use-case services.
//!
//! # Invariants
//! - Neither dreams nor summaries are written for future dates.
//! - A dream description only survives when a dream happened.
//! - Blank free text is stored as `None`.

use crate::clock::Clock;
use crate::model::date::LogDate;
use crate::model::dream::{DreamRecord, DreamState};
use crate::model::summary::DailySummary;
use crate::repo::dream_repo::DreamRepository;
use crate::repo::summary_repo::SummaryRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Result of resetting a dream entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DreamResetOutcome {
    /// An existing entry was set back to "no dream".
    Reset,
    /// There was nothing stored for the date.
    NoRecord,
}

impl DreamResetOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::NoRecord => "no_record",
        }
    }
}

pub struct DreamService<R: DreamRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: DreamRepository, C: Clock> DreamService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn get_dream(&self, date: LogDate) -> ServiceResult<Option<DreamRecord>> {
        Ok(self.repo.get_dream(date)?)
    }

    /// Creates or replaces the dream entry for `date`.
    pub fn upsert_dream(
        &self,
        date: LogDate,
        dream_state: DreamState,
        description: Option<String>,
    ) -> ServiceResult<DreamRecord> {
        ensure_not_future(date, self.clock.today(), "dream_upsert")?;
        let record = DreamRecord::new(date, dream_state, description);
        let stored = self.repo.upsert_dream(&record)?;
        info!(
            "event=dream_upsert module=service status=ok date={} dream_state={} has_description={}",
            date,
            stored.dream_state.code(),
            stored.description.is_some()
        );
        Ok(stored)
    }

    /// Sets the entry for `date` back to "no dream".
    pub fn reset_dream(&self, date: LogDate) -> ServiceResult<DreamResetOutcome> {
        let outcome = if self.repo.reset_dream(date)? {
            DreamResetOutcome::Reset
        } else {
            DreamResetOutcome::NoRecord
        };
        info!(
            "event=dream_reset module=service status=ok date={} outcome={}",
            date,
            outcome.as_str()
        );
        Ok(outcome)
    }
}

pub struct SummaryService<R: SummaryRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: SummaryRepository, C: Clock> SummaryService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn get_summary(&self, date: LogDate) -> ServiceResult<Option<DailySummary>> {
        Ok(self.repo.get_summary(date)?)
    }

    /// Creates or replaces the reflection text for `date`.
    pub fn upsert_summary(
        &self,
        date: LogDate,
        highlight: Option<String>,
        reflection: Option<String>,
    ) -> ServiceResult<DailySummary> {
        ensure_not_future(date, self.clock.today(), "summary_upsert")?;
        let summary = DailySummary::new(date, non_blank(highlight), non_blank(reflection));
        let stored = self.repo.upsert_summary(&summary)?;
        info!(
            "event=summary_upsert module=service status=ok date={} has_highlight={} has_reflection={}",
            date,
            stored.highlight.is_some(),
            stored.reflection.is_some()
        );
        Ok(stored)
    }
}

pub(crate) fn ensure_not_future(
    date: LogDate,
    today: LogDate,
    event: &'static str,
) -> ServiceResult<()> {
    if date > today {
        warn!(
            "event={} module=service status=rejected date={} reason=future_date",
            event, date
        );
        return Err(ServiceError::FutureDate(date));
    }
    Ok(())
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
