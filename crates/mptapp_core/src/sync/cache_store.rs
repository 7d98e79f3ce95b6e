//! Typed persisted cache with freshness queries.
//!
//! # Responsibility
//! - Serialize values to JSON and persist them with a write timestamp.
//! - Answer age and freshness queries against the injected clock.
//!
//! # Invariants
//! - Reads are total: a missing, unreadable or undecodable entry is `None`.
//! - `is_fresh` is `age < threshold`; absent entries are never fresh.
//! - `put` replaces value and timestamp together or leaves the old entry.

use crate::clock::{elapsed_between, Clock};
use crate::repo::cache_repo::{CacheRepository, RawCacheEntry};
use crate::repo::RepoError;
use crate::sync::resource::{ResourceKey, ResourceKind};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug)]
pub enum CacheError {
    Encode(serde_json::Error),
    Repo(RepoError),
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "cache value encode failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for CacheError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Decoded cache entry with its last successful write time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub key: String,
    pub value: T,
    pub written_at_ms: i64,
}

/// Typed facade over a [`CacheRepository`].
pub struct CacheStore<R: CacheRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: CacheRepository, C: Clock> CacheStore<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Replaces the value stored under `key` and stamps it with `now`.
    pub fn put<T: Serialize>(&self, key: &ResourceKey, value: &T) -> CacheResult<()> {
        let payload = serde_json::to_string(value).map_err(CacheError::Encode)?;
        let storage_key = key.storage_key();
        self.repo.write_entry(
            &storage_key,
            key.kind().as_str(),
            &payload,
            self.clock.now_millis(),
        )?;
        debug!(
            "event=cache_put module=cache status=ok key={storage_key} bytes={}",
            payload.len()
        );
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &ResourceKey) -> Option<T> {
        self.entry(key).map(|entry| entry.value)
    }

    pub fn entry<T: DeserializeOwned>(&self, key: &ResourceKey) -> Option<CacheEntry<T>> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw.payload) {
            Ok(value) => Some(CacheEntry {
                key: raw.key,
                value,
                written_at_ms: raw.written_at_ms,
            }),
            Err(err) => {
                warn!(
                    "event=cache_get module=cache status=error key={} error_code=decode_failed error={err}",
                    raw.key
                );
                None
            }
        }
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.read_raw(key).is_some()
    }

    /// Time since the last successful write, or `None` when absent.
    pub fn age_of(&self, key: &ResourceKey) -> Option<Duration> {
        self.read_raw(key)
            .map(|raw| elapsed_between(raw.written_at_ms, self.clock.now_millis()))
    }

    pub fn is_fresh(&self, key: &ResourceKey, threshold: Duration) -> bool {
        self.age_of(key).is_some_and(|age| age < threshold)
    }

    pub fn remove(&self, key: &ResourceKey) -> CacheResult<bool> {
        Ok(self.repo.delete_entry(&key.storage_key())?)
    }

    /// Drops every entry of one resource kind.
    pub fn clear_kind(&self, kind: ResourceKind) -> CacheResult<usize> {
        Ok(self.repo.delete_kind(kind.as_str())?)
    }

    /// Drops every cache entry. Ratings, votes and homework are untouched.
    pub fn clear_all(&self) -> CacheResult<usize> {
        Ok(self.repo.delete_all()?)
    }

    fn read_raw(&self, key: &ResourceKey) -> Option<RawCacheEntry> {
        let storage_key = key.storage_key();
        match self.repo.read_entry(&storage_key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=cache_get module=cache status=error key={storage_key} error_code=read_failed error={err}"
                );
                None
            }
        }
    }
}
