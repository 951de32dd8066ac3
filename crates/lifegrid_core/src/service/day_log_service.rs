//! Day log use-case service.
//!
//! # Responsibility
//! - Validate incoming hour arrays and upsert them by date.
//! - Derive the `is_reconstructed` provenance flag from the write date.
//!
//! # Invariants
//! - Future dates are never written.
//! - `is_reconstructed` is recomputed on every write: true iff the date is
//!   older than yesterday.
//! - Hour validation is strict here; lenient normalization only applies to
//!   rows already in storage.

use crate::clock::Clock;
use crate::model::date::{DateStatus, LogDate};
use crate::model::day_log::{DayHours, DayLog};
use crate::repo::day_log_repo::DayLogRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Use-case service for reading and writing day logs.
pub struct DayLogService<R: DayLogRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: DayLogRepository, C: Clock> DayLogService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Gets the log for `date`; `None` means nothing was logged yet.
    pub fn get_day_log(&self, date: LogDate) -> ServiceResult<Option<DayLog>> {
        Ok(self.repo.get_day_log(date)?)
    }

    /// Creates or replaces the log for `date` from wire codes.
    ///
    /// Codes follow the external contract: `None`/`-1` for unassigned,
    /// `0..=11` for categories, exactly 24 entries.
    pub fn upsert_day_log(
        &self,
        date: LogDate,
        codes: &[Option<i64>],
    ) -> ServiceResult<DayLog> {
        let hours = DayHours::from_codes(codes).inspect_err(|err| {
            warn!(
                "event=day_log_upsert module=service status=rejected date={} reason={}",
                date, err
            );
        })?;
        self.upsert_day_hours(date, hours)
    }

    /// Creates or replaces the log for `date` from typed slots.
    pub fn upsert_day_hours(&self, date: LogDate, hours: DayHours) -> ServiceResult<DayLog> {
        let status = self.date_status(date);
        if status == DateStatus::Future {
            warn!(
                "event=day_log_upsert module=service status=rejected date={} reason=future_date",
                date
            );
            return Err(ServiceError::FutureDate(date));
        }

        let log = DayLog::new(date, hours, status == DateStatus::Reconstructed);
        let stored = self.repo.upsert_day_log(&log)?;
        info!(
            "event=day_log_upsert module=service status=ok date={} tracked_hours={} reconstructed={}",
            date,
            stored.hours.tracked_hours(),
            stored.is_reconstructed
        );
        Ok(stored)
    }

    /// Classifies `date` relative to the service clock.
    pub fn date_status(&self, date: LogDate) -> DateStatus {
        DateStatus::classify(date, self.clock.today())
    }
}
