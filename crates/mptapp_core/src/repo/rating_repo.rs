//! Teacher rating and voter map persistence.
//!
//! # Responsibility
//! - Store aggregate counters per teacher in insertion order.
//! - Store each voter's current vote separately from the counters.
//!
//! # Invariants
//! - Counter updates and voter-map updates for one vote share a transaction.
//! - Rating rows are created lazily and never deleted by vote operations.

use crate::model::rating::{LedgerMode, TeacherRating, VoteKind};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const RATING_SELECT_SQL: &str = "SELECT teacher_name, likes, neutrals, dislikes
FROM teacher_ratings";

/// Storage contract for the vote ledger.
pub trait RatingRepository {
    /// All ratings in insertion order.
    fn list_ratings(&self) -> RepoResult<Vec<TeacherRating>>;
    fn get_rating(&self, teacher_name: &str) -> RepoResult<Option<TeacherRating>>;
    /// Inserts names that have no rating yet; returns the number added.
    fn insert_missing(&self, teacher_names: &[String]) -> RepoResult<usize>;
    fn current_vote(&self, teacher_name: &str, voter_id: &str) -> RepoResult<Option<VoteKind>>;
    /// Current votes of one voter, keyed by teacher name.
    fn votes_of(&self, voter_id: &str) -> RepoResult<Vec<(String, VoteKind)>>;
    fn record_cast(
        &self,
        teacher_name: &str,
        voter_id: &str,
        kind: VoteKind,
        mode: LedgerMode,
        voted_at_ms: i64,
    ) -> RepoResult<TeacherRating>;
    /// Returns `None` when the teacher has no rating row.
    fn record_retract(
        &self,
        teacher_name: &str,
        voter_id: &str,
        mode: LedgerMode,
    ) -> RepoResult<Option<TeacherRating>>;
    /// Zeroes every counter and clears every voter map entry.
    fn reset_all(&self) -> RepoResult<()>;
}

/// SQLite-backed rating repository.
pub struct SqliteRatingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRatingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RatingRepository for SqliteRatingRepository<'_> {
    fn list_ratings(&self) -> RepoResult<Vec<TeacherRating>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RATING_SELECT_SQL} ORDER BY position ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut ratings = Vec::new();
        while let Some(row) = rows.next()? {
            ratings.push(parse_rating_row(row)?);
        }
        Ok(ratings)
    }

    fn get_rating(&self, teacher_name: &str) -> RepoResult<Option<TeacherRating>> {
        load_rating(self.conn, teacher_name)
    }

    fn insert_missing(&self, teacher_names: &[String]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut added = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO teacher_ratings (teacher_name)
                 VALUES (?1)
                 ON CONFLICT(teacher_name) DO NOTHING;",
            )?;
            for name in teacher_names {
                added += stmt.execute([name.as_str()])?;
            }
        }
        tx.commit()?;
        Ok(added)
    }

    fn current_vote(&self, teacher_name: &str, voter_id: &str) -> RepoResult<Option<VoteKind>> {
        load_vote(self.conn, teacher_name, voter_id)
    }

    fn votes_of(&self, voter_id: &str) -> RepoResult<Vec<(String, VoteKind)>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_votes.teacher_name, user_votes.vote
             FROM user_votes
             JOIN teacher_ratings ON teacher_ratings.teacher_name = user_votes.teacher_name
             WHERE user_votes.voter_id = ?1
             ORDER BY teacher_ratings.position ASC;",
        )?;
        let mut rows = stmt.query([voter_id])?;
        let mut votes = Vec::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            let raw: String = row.get(1)?;
            votes.push((name, parse_vote(&raw)?));
        }
        Ok(votes)
    }

    fn record_cast(
        &self,
        teacher_name: &str,
        voter_id: &str,
        kind: VoteKind,
        mode: LedgerMode,
        voted_at_ms: i64,
    ) -> RepoResult<TeacherRating> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO teacher_ratings (teacher_name)
             VALUES (?1)
             ON CONFLICT(teacher_name) DO NOTHING;",
            [teacher_name],
        )?;

        let mut rating = load_rating(&tx, teacher_name)?
            .ok_or_else(|| RepoError::NotFound(format!("teacher rating `{teacher_name}`")))?;
        let previous = load_vote(&tx, teacher_name, voter_id)?;
        rating.apply_cast(previous, kind, mode);

        store_counters(&tx, &rating)?;
        tx.execute(
            "INSERT INTO user_votes (teacher_name, voter_id, vote, voted_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(teacher_name, voter_id) DO UPDATE SET
                vote = excluded.vote,
                voted_at = excluded.voted_at;",
            params![teacher_name, voter_id, kind.as_str(), voted_at_ms],
        )?;
        tx.commit()?;

        Ok(rating)
    }

    fn record_retract(
        &self,
        teacher_name: &str,
        voter_id: &str,
        mode: LedgerMode,
    ) -> RepoResult<Option<TeacherRating>> {
        let tx = self.conn.unchecked_transaction()?;
        let Some(mut rating) = load_rating(&tx, teacher_name)? else {
            return Ok(None);
        };
        let previous = load_vote(&tx, teacher_name, voter_id)?;
        if previous.is_none() {
            return Ok(Some(rating));
        }

        rating.apply_retract(previous, mode);
        store_counters(&tx, &rating)?;
        tx.execute(
            "DELETE FROM user_votes WHERE teacher_name = ?1 AND voter_id = ?2;",
            params![teacher_name, voter_id],
        )?;
        tx.commit()?;

        Ok(Some(rating))
    }

    fn reset_all(&self) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(
            "DELETE FROM user_votes;
             UPDATE teacher_ratings SET likes = 0, neutrals = 0, dislikes = 0;",
        )?;
        tx.commit()?;
        Ok(())
    }
}

fn load_rating(conn: &Connection, teacher_name: &str) -> RepoResult<Option<TeacherRating>> {
    let mut stmt = conn.prepare(&format!("{RATING_SELECT_SQL} WHERE teacher_name = ?1;"))?;
    let mut rows = stmt.query([teacher_name])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_rating_row(row)?)),
        None => Ok(None),
    }
}

fn load_vote(conn: &Connection, teacher_name: &str, voter_id: &str) -> RepoResult<Option<VoteKind>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT vote FROM user_votes WHERE teacher_name = ?1 AND voter_id = ?2;",
            params![teacher_name, voter_id],
            |row| row.get(0),
        )
        .optional()?;
    raw.as_deref().map(parse_vote).transpose()
}

fn store_counters(conn: &Connection, rating: &TeacherRating) -> RepoResult<()> {
    conn.execute(
        "UPDATE teacher_ratings
         SET likes = ?1, neutrals = ?2, dislikes = ?3
         WHERE teacher_name = ?4;",
        params![
            rating.likes,
            rating.neutrals,
            rating.dislikes,
            rating.teacher_name.as_str()
        ],
    )?;
    Ok(())
}

fn parse_rating_row(row: &Row<'_>) -> RepoResult<TeacherRating> {
    let teacher_name: String = row.get("teacher_name")?;
    Ok(TeacherRating {
        likes: parse_counter(row.get("likes")?, &teacher_name, "likes")?,
        neutrals: parse_counter(row.get("neutrals")?, &teacher_name, "neutrals")?,
        dislikes: parse_counter(row.get("dislikes")?, &teacher_name, "dislikes")?,
        teacher_name,
    })
}

fn parse_counter(value: i64, teacher_name: &str, column: &str) -> RepoResult<u32> {
    u32::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid counter `{value}` in teacher_ratings.{column} for `{teacher_name}`"
        ))
    })
}

fn parse_vote(value: &str) -> RepoResult<VoteKind> {
    VoteKind::parse(value)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid vote `{value}` in user_votes.vote")))
}
