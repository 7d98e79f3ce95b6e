//! Lesson slot model.
//!
//! # Responsibility
//! - Describe one numbered pair of a teaching day, with an optional
//!   denominator variant for double-booked slots.
//! - Derive date-bound identities for either variant.
//!
//! # Invariants
//! - `slot_number` is in `1..=7`.
//! - A slot never carries a date; dates are bound during projection.

use crate::model::catalog::WeekParity;
use crate::model::identity::{
    derive_identity, IdentityFields, IdentityScheme, LessonIdentity, LessonVariant,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_SLOT_NUMBER: u8 = 1;
pub const MAX_SLOT_NUMBER: u8 = 7;

/// Start/end times of the fixed bell schedule, indexed by slot number.
const BELL_TIMES: [(&str, &str); 7] = [
    ("08:30", "10:00"),
    ("10:10", "11:40"),
    ("12:00", "13:30"),
    ("13:50", "15:20"),
    ("15:30", "17:00"),
    ("17:05", "18:35"),
    ("18:40", "20:10"),
];

/// Returns `(start, end)` for a slot number, or empty strings when unknown.
pub fn bell_times(slot_number: u8) -> (&'static str, &'static str) {
    usize::from(slot_number)
        .checked_sub(1)
        .and_then(|index| BELL_TIMES.get(index))
        .copied()
        .unwrap_or(("", ""))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonValidationError {
    SlotNumberOutOfRange(u8),
}

impl Display for LessonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SlotNumberOutOfRange(value) => write!(
                f,
                "slot number {value} is outside {MIN_SLOT_NUMBER}..={MAX_SLOT_NUMBER}"
            ),
        }
    }
}

impl Error for LessonValidationError {}

/// One numbered pair of a template day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonSlot {
    pub slot_number: u8,
    pub subject_primary: String,
    pub teacher_primary: String,
    /// Denominator-week subject; `None` or empty for single-variant slots.
    pub subject_secondary: Option<String>,
    pub teacher_secondary: Option<String>,
    pub campus: String,
    pub start_time: String,
    pub end_time: String,
}

impl LessonSlot {
    /// Creates a single-variant slot using the bell schedule for its times.
    pub fn new(
        slot_number: u8,
        subject: impl Into<String>,
        teacher: impl Into<String>,
        campus: impl Into<String>,
    ) -> Self {
        let (start_time, end_time) = bell_times(slot_number);
        Self {
            slot_number,
            subject_primary: subject.into(),
            teacher_primary: teacher.into(),
            subject_secondary: None,
            teacher_secondary: None,
            campus: campus.into(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    /// Adds a denominator variant.
    pub fn with_secondary(mut self, subject: impl Into<String>, teacher: impl Into<String>) -> Self {
        self.subject_secondary = Some(subject.into());
        self.teacher_secondary = Some(teacher.into());
        self
    }

    pub fn validate(&self) -> Result<(), LessonValidationError> {
        if !(MIN_SLOT_NUMBER..=MAX_SLOT_NUMBER).contains(&self.slot_number) {
            return Err(LessonValidationError::SlotNumberOutOfRange(
                self.slot_number,
            ));
        }
        Ok(())
    }

    pub fn has_secondary(&self) -> bool {
        self.subject_secondary
            .as_deref()
            .is_some_and(|subject| !subject.is_empty())
    }

    /// Returns `(subject, teacher)` shown for the given week parity.
    ///
    /// Single-variant slots show the primary pair in both parities.
    pub fn variant_for(&self, parity: WeekParity) -> (&str, &str) {
        match parity {
            WeekParity::Denominator if self.has_secondary() => (
                self.subject_secondary.as_deref().unwrap_or_default(),
                self.teacher_secondary.as_deref().unwrap_or_default(),
            ),
            _ => (self.subject_primary.as_str(), self.teacher_primary.as_str()),
        }
    }

    /// Identity hash input for one variant on a date.
    pub fn identity_fields(
        &self,
        date: Option<NaiveDate>,
        variant: LessonVariant,
    ) -> IdentityFields<'_> {
        let (subject, teacher) = match variant {
            LessonVariant::Primary => (self.subject_primary.as_str(), self.teacher_primary.as_str()),
            LessonVariant::Secondary => (
                self.subject_secondary.as_deref().unwrap_or_default(),
                self.teacher_secondary.as_deref().unwrap_or_default(),
            ),
        };
        IdentityFields {
            slot_number: self.slot_number,
            subject,
            teacher,
            start_time: &self.start_time,
            end_time: &self.end_time,
            campus: &self.campus,
            date,
            variant,
        }
    }

    pub fn identity(
        &self,
        date: Option<NaiveDate>,
        variant: LessonVariant,
        scheme: IdentityScheme,
    ) -> LessonIdentity {
        derive_identity(&self.identity_fields(date, variant), scheme)
    }
}
