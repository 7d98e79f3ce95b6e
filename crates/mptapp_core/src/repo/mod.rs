//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define storage contracts for cache entries, ratings and homework.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Multi-row mutations (a vote touching counters and the voter map) run in
//!   one transaction.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::homework::HomeworkValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod cache_repo;
pub mod homework_repo;
pub mod rating_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all SQLite-backed repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Validation(HomeworkValidationError),
    NotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
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

impl From<HomeworkValidationError> for RepoError {
    fn from(value: HomeworkValidationError) -> Self {
        Self::Validation(value)
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
