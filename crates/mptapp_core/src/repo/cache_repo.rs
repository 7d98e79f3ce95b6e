//! Cache entry storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist opaque serialized payloads with their last-write timestamps.
//!
//! # Invariants
//! - A write replaces payload and timestamp together or not at all.
//! - A failed write leaves the previous entry untouched.

use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Serialized cache entry as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCacheEntry {
    pub key: String,
    pub kind: String,
    pub payload: String,
    pub written_at_ms: i64,
}

/// Storage contract for cache entries.
pub trait CacheRepository {
    fn read_entry(&self, key: &str) -> RepoResult<Option<RawCacheEntry>>;
    fn write_entry(&self, key: &str, kind: &str, payload: &str, written_at_ms: i64)
        -> RepoResult<()>;
    fn delete_entry(&self, key: &str) -> RepoResult<bool>;
    fn delete_kind(&self, kind: &str) -> RepoResult<usize>;
    fn delete_all(&self) -> RepoResult<usize>;
}

/// SQLite-backed cache repository over `cache_entries`.
pub struct SqliteCacheRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCacheRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CacheRepository for SqliteCacheRepository<'_> {
    fn read_entry(&self, key: &str) -> RepoResult<Option<RawCacheEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT cache_key, resource_kind, payload, written_at
                 FROM cache_entries
                 WHERE cache_key = ?1;",
                [key],
                |row| {
                    Ok(RawCacheEntry {
                        key: row.get(0)?,
                        kind: row.get(1)?,
                        payload: row.get(2)?,
                        written_at_ms: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    fn write_entry(
        &self,
        key: &str,
        kind: &str,
        payload: &str,
        written_at_ms: i64,
    ) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO cache_entries (cache_key, resource_kind, payload, written_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(cache_key) DO UPDATE SET
                resource_kind = excluded.resource_kind,
                payload = excluded.payload,
                written_at = excluded.written_at;",
            params![key, kind, payload, written_at_ms],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_entry(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM cache_entries WHERE cache_key = ?1;", [key])?;
        Ok(changed > 0)
    }

    fn delete_kind(&self, kind: &str) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM cache_entries WHERE resource_kind = ?1;", [kind])?;
        Ok(changed)
    }

    fn delete_all(&self) -> RepoResult<usize> {
        let changed = self.conn.execute("DELETE FROM cache_entries;", [])?;
        Ok(changed)
    }
}
