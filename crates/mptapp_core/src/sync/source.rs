//! Consumed network capability.
//!
//! Transport is opaque to core: implementations return raw JSON bodies and
//! core decodes them. Decode failures are reported as
//! [`FetchError::MalformedResponse`] and handled exactly like transport
//! failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure of one fetch attempt. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network unreachable, timeout, or non-success status.
    Transport(String),
    /// Body could not be decoded into the expected records.
    MalformedResponse(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "fetch failed: {message}"),
            Self::MalformedResponse(message) => write!(f, "malformed response: {message}"),
        }
    }
}

impl Error for FetchError {}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedResponse(value.to_string())
    }
}

/// Remote schedule API as seen by core.
pub trait ScheduleSource {
    /// Current week label and numerator/denominator tag.
    fn fetch_week_info(&self) -> FetchResult<String>;
    /// Week template plus week info for one group.
    fn fetch_week_schedule(&self, group_id: &str, specialty_id: &str) -> FetchResult<String>;
    /// Replacements by date, filtered to one group.
    fn fetch_replacements(&self, group_id: &str) -> FetchResult<String>;
    fn fetch_specialties(&self) -> FetchResult<String>;
    fn fetch_groups(&self, specialty_id: &str) -> FetchResult<String>;
    /// Opaque token that changes whenever promotional content changes.
    fn fetch_content_version(&self) -> FetchResult<String>;
    fn fetch_news(&self) -> FetchResult<String>;
}

impl<S: ScheduleSource + ?Sized> ScheduleSource for &S {
    fn fetch_week_info(&self) -> FetchResult<String> {
        (**self).fetch_week_info()
    }

    fn fetch_week_schedule(&self, group_id: &str, specialty_id: &str) -> FetchResult<String> {
        (**self).fetch_week_schedule(group_id, specialty_id)
    }

    fn fetch_replacements(&self, group_id: &str) -> FetchResult<String> {
        (**self).fetch_replacements(group_id)
    }

    fn fetch_specialties(&self) -> FetchResult<String> {
        (**self).fetch_specialties()
    }

    fn fetch_groups(&self, specialty_id: &str) -> FetchResult<String> {
        (**self).fetch_groups(specialty_id)
    }

    fn fetch_content_version(&self) -> FetchResult<String> {
        (**self).fetch_content_version()
    }

    fn fetch_news(&self) -> FetchResult<String> {
        (**self).fetch_news()
    }
}
