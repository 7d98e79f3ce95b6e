//! Homework persistence keyed by lesson identity.
//!
//! # Invariants
//! - At most one homework record per lesson identity; saving replaces it.
//! - Write paths call `HomeworkRecord::validate()` before SQL mutations.

use crate::model::homework::HomeworkRecord;
use crate::model::identity::LessonIdentity;
use crate::repo::{bool_to_int, int_to_bool, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const HOMEWORK_SELECT_SQL: &str = "SELECT
    uuid,
    lesson_id,
    title,
    notes,
    due_date,
    should_remind,
    is_completed
FROM homework";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait HomeworkRepository {
    fn save_homework(&self, record: &HomeworkRecord) -> RepoResult<()>;
    fn get_for_lesson(&self, lesson_id: LessonIdentity) -> RepoResult<Option<HomeworkRecord>>;
    fn list_due_on(&self, date: NaiveDate) -> RepoResult<Vec<HomeworkRecord>>;
    fn delete_for_lesson(&self, lesson_id: LessonIdentity) -> RepoResult<bool>;
}

pub struct SqliteHomeworkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHomeworkRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl HomeworkRepository for SqliteHomeworkRepository<'_> {
    fn save_homework(&self, record: &HomeworkRecord) -> RepoResult<()> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO homework (
                uuid,
                lesson_id,
                title,
                notes,
                due_date,
                should_remind,
                is_completed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(lesson_id) DO UPDATE SET
                title = excluded.title,
                notes = excluded.notes,
                due_date = excluded.due_date,
                should_remind = excluded.should_remind,
                is_completed = excluded.is_completed,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                record.id.to_string(),
                record.lesson_id.to_string(),
                record.title.as_str(),
                record.notes.as_str(),
                record.due_date.format(DATE_FORMAT).to_string(),
                bool_to_int(record.should_remind),
                bool_to_int(record.is_completed),
            ],
        )?;

        Ok(())
    }

    fn get_for_lesson(&self, lesson_id: LessonIdentity) -> RepoResult<Option<HomeworkRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HOMEWORK_SELECT_SQL} WHERE lesson_id = ?1;"))?;
        let mut rows = stmt.query([lesson_id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_homework_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_due_on(&self, date: NaiveDate) -> RepoResult<Vec<HomeworkRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{HOMEWORK_SELECT_SQL} WHERE due_date = ?1 ORDER BY updated_at ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([date.format(DATE_FORMAT).to_string()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_homework_row(row)?);
        }
        Ok(records)
    }

    fn delete_for_lesson(&self, lesson_id: LessonIdentity) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM homework WHERE lesson_id = ?1;",
            [lesson_id.to_string()],
        )?;
        Ok(changed > 0)
    }
}

fn parse_uuid(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in homework.{column}"))
    })
}

fn parse_homework_row(row: &Row<'_>) -> RepoResult<HomeworkRecord> {
    let due_text: String = row.get("due_date")?;
    let due_date = NaiveDate::parse_from_str(&due_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{due_text}` in homework.due_date"))
    })?;

    Ok(HomeworkRecord {
        id: parse_uuid(row, "uuid")?,
        lesson_id: parse_uuid(row, "lesson_id")?,
        title: row.get("title")?,
        notes: row.get("notes")?,
        due_date,
        should_remind: int_to_bool(row.get("should_remind")?, "homework.should_remind")?,
        is_completed: int_to_bool(row.get("is_completed")?, "homework.is_completed")?,
    })
}
