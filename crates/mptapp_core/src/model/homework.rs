//! Homework record attached to one lesson occurrence.
//!
//! # Invariants
//! - `lesson_id` is a date-bound lesson identity; one record per lesson.
//! - `title` is non-blank after trim.

use crate::model::identity::LessonIdentity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeworkValidationError {
    BlankTitle,
}

impl Display for HomeworkValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "homework title must not be blank"),
        }
    }
}

impl Error for HomeworkValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkRecord {
    pub id: Uuid,
    pub lesson_id: LessonIdentity,
    pub title: String,
    pub notes: String,
    pub due_date: NaiveDate,
    pub should_remind: bool,
    pub is_completed: bool,
}

impl HomeworkRecord {
    pub fn new(lesson_id: LessonIdentity, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            lesson_id,
            title: title.into(),
            notes: String::new(),
            due_date,
            should_remind: false,
            is_completed: false,
        }
    }

    pub fn validate(&self) -> Result<(), HomeworkValidationError> {
        if self.title.trim().is_empty() {
            return Err(HomeworkValidationError::BlankTitle);
        }
        Ok(())
    }
}
