//! Homework attached to projected lessons.
//!
//! # Invariants
//! - Homework is keyed by the date-bound identity of the chosen variant,
//!   so it never bleeds into the same slot of another week.

use crate::model::homework::HomeworkRecord;
use crate::model::identity::{LessonIdentity, LessonVariant};
use crate::model::schedule::{ProjectedDay, ProjectedLesson};
use crate::repo::homework_repo::HomeworkRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;

pub struct HomeworkService<R: HomeworkRepository> {
    repo: R,
}

impl<R: HomeworkRepository> HomeworkService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Identity homework for `lesson` is stored under.
    ///
    /// Falls back to the primary identity when no secondary variant exists.
    pub fn lesson_key(lesson: &ProjectedLesson, variant: LessonVariant) -> LessonIdentity {
        match variant {
            LessonVariant::Secondary => lesson.secondary_identity.unwrap_or(lesson.identity),
            LessonVariant::Primary => lesson.identity,
        }
    }

    /// Creates or replaces the homework of one lesson, due on its date.
    pub fn save_for_lesson(
        &self,
        lesson: &ProjectedLesson,
        variant: LessonVariant,
        title: &str,
        notes: &str,
        should_remind: bool,
    ) -> RepoResult<HomeworkRecord> {
        self.save_for_identity(
            Self::lesson_key(lesson, variant),
            title,
            notes,
            lesson.date,
            should_remind,
        )
    }

    /// Creates or replaces the homework stored under `lesson_id`.
    ///
    /// An existing record keeps its id and completion flag.
    pub fn save_for_identity(
        &self,
        lesson_id: LessonIdentity,
        title: &str,
        notes: &str,
        due_date: NaiveDate,
        should_remind: bool,
    ) -> RepoResult<HomeworkRecord> {
        let title = title.trim();
        let mut record = match self.repo.get_for_lesson(lesson_id)? {
            Some(existing) => existing,
            None => HomeworkRecord::new(lesson_id, title, due_date),
        };
        record.title = title.to_string();
        record.notes = notes.to_string();
        record.due_date = due_date;
        record.should_remind = should_remind;

        self.repo.save_homework(&record)?;
        Ok(record)
    }

    pub fn for_lesson(&self, lesson_id: LessonIdentity) -> RepoResult<Option<HomeworkRecord>> {
        self.repo.get_for_lesson(lesson_id)
    }

    /// Homework of every lesson variant on a projected day, in lesson order.
    pub fn for_day(&self, day: &ProjectedDay) -> RepoResult<Vec<HomeworkRecord>> {
        let mut records = Vec::new();
        for lesson in &day.lessons {
            let ids = std::iter::once(lesson.identity).chain(lesson.secondary_identity);
            for id in ids {
                if let Some(record) = self.repo.get_for_lesson(id)? {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    pub fn set_completed(&self, lesson_id: LessonIdentity, completed: bool) -> RepoResult<HomeworkRecord> {
        let mut record = self
            .repo
            .get_for_lesson(lesson_id)?
            .ok_or_else(|| RepoError::NotFound(lesson_id.to_string()))?;
        record.is_completed = completed;
        self.repo.save_homework(&record)?;
        Ok(record)
    }

    pub fn remove(&self, lesson_id: LessonIdentity) -> RepoResult<bool> {
        self.repo.delete_for_lesson(lesson_id)
    }
}
