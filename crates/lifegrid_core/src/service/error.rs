//! Error type shared by the use-case services.

use crate::dashboard::window::WindowError;
use crate::model::date::LogDate;
use crate::model::day_log::DayLogValidationError;
use crate::repo::day_log_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level failure.
#[derive(Debug)]
pub enum ServiceError {
    /// Writes are not allowed for dates after today.
    FutureDate(LogDate),
    /// Hour array failed strict validation.
    Validation(DayLogValidationError),
    /// Event title is blank after trim.
    BlankTitle,
    /// Event category tag is not a known code.
    InvalidCategory(i64),
    /// Range start is after range end.
    InvalidRange { start: LogDate, end: LogDate },
    /// Malformed dashboard window.
    Window(WindowError),
    /// Target record does not exist.
    NotFound(Uuid),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FutureDate(date) => write!(f, "cannot write entries for future date {date}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::InvalidCategory(code) => write!(f, "unknown category code {code}"),
            Self::InvalidRange { start, end } => {
                write!(f, "start_date {start} must be <= end_date {end}")
            }
            Self::Window(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Window(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<DayLogValidationError> for ServiceError {
    fn from(value: DayLogValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<WindowError> for ServiceError {
    fn from(value: WindowError) -> Self {
        Self::Window(value)
    }
}
