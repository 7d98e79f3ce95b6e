//! Week template, replacement and projected-day models.
//!
//! # Responsibility
//! - Hold one canonical week of lessons valid for every calendar week.
//! - Hold day-specific replacements keyed by exact date.
//! - Describe the per-date output of projection.
//!
//! # Invariants
//! - A `DaySlot` weekday is always recomputed from its `reference_date`.
//! - Sunday is never stored in a template.
//! - Replacements never mutate template lessons.

use crate::model::catalog::WeekInfo;
use crate::model::identity::LessonIdentity;
use crate::model::lesson::LessonSlot;
use chrono::{Datelike, Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Weekday index of Sunday with Monday as 0.
pub const SUNDAY_INDEX: u8 = 6;

static CANCELLATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)отменено").expect("valid cancellation regex"));
static TRANSFER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)перенесено").expect("valid transfer regex"));

/// Returns the weekday index of `date`, Monday = 0 .. Sunday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    // num_days_from_monday is always 0..=6.
    date.weekday().num_days_from_monday() as u8
}

/// Returns the Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(weekday_index(date))))
        .unwrap_or(date)
}

/// Lessons of one weekday, anchored to the date they were fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    pub reference_date: NaiveDate,
    pub is_day_off: bool,
    pub lessons: Vec<LessonSlot>,
}

impl DaySlot {
    pub fn weekday_index(&self) -> u8 {
        weekday_index(self.reference_date)
    }
}

/// One canonical week of lessons for a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTemplate {
    pub group_id: String,
    pub specialty_id: String,
    pub week_info: WeekInfo,
    pub days: Vec<DaySlot>,
}

impl WeekTemplate {
    /// Finds the day whose reference date falls on `index`.
    pub fn day_for_index(&self, index: u8) -> Option<&DaySlot> {
        self.days.iter().find(|day| day.weekday_index() == index)
    }

    /// Iterates over every lesson slot of the week.
    pub fn lessons(&self) -> impl Iterator<Item = &LessonSlot> {
        self.days.iter().flat_map(|day| day.lessons.iter())
    }
}

/// Day-specific change to one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementEntry {
    pub slot_number: u8,
    pub original_subject: String,
    pub new_subject: String,
    /// Server-formatted time the replacement was published.
    pub added_at: String,
}

impl ReplacementEntry {
    pub fn is_cancellation(&self) -> bool {
        CANCELLATION_RE.is_match(&self.new_subject)
    }

    pub fn is_transfer(&self) -> bool {
        TRANSFER_RE.is_match(&self.new_subject)
    }
}

/// All replacements published for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementDay {
    pub date: NaiveDate,
    pub entries: Vec<ReplacementEntry>,
}

/// Replacements of one group, keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementSchedule {
    pub group_id: String,
    /// Sorted by date, at most one element per date.
    pub days: Vec<ReplacementDay>,
}

impl ReplacementSchedule {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            days: Vec::new(),
        }
    }

    /// Appends entries for `date`, keeping days sorted and unique.
    pub fn add(&mut self, date: NaiveDate, entries: impl IntoIterator<Item = ReplacementEntry>) {
        match self.days.binary_search_by_key(&date, |day| day.date) {
            Ok(index) => self.days[index].entries.extend(entries),
            Err(index) => self.days.insert(
                index,
                ReplacementDay {
                    date,
                    entries: entries.into_iter().collect(),
                },
            ),
        }
    }

    /// Replacements for exactly `date`.
    pub fn for_date(&self, date: NaiveDate) -> &[ReplacementEntry] {
        self.days
            .binary_search_by_key(&date, |day| day.date)
            .map(|index| self.days[index].entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|day| day.entries.is_empty())
    }
}

/// A template slot bound to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedLesson {
    pub slot: LessonSlot,
    pub date: NaiveDate,
    pub identity: LessonIdentity,
    /// Present only when the slot has a denominator variant.
    pub secondary_identity: Option<LessonIdentity>,
}

/// Concrete schedule of one date. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedDay {
    pub date: NaiveDate,
    pub lessons: Vec<ProjectedLesson>,
    pub replacements: Vec<ReplacementEntry>,
    pub is_day_off: bool,
}

impl ProjectedDay {
    pub fn empty(date: NaiveDate, is_day_off: bool) -> Self {
        Self {
            date,
            lessons: Vec::new(),
            replacements: Vec::new(),
            is_day_off,
        }
    }

    /// Replacements targeting one slot number.
    pub fn replacements_for_slot(&self, slot_number: u8) -> impl Iterator<Item = &ReplacementEntry> {
        self.replacements
            .iter()
            .filter(move |entry| entry.slot_number == slot_number)
    }
}

#[cfg(test)]
mod tests {
    use super::{monday_of, weekday_index, ReplacementEntry, ReplacementSchedule};
    use chrono::NaiveDate;

    fn entry(slot_number: u8, new_subject: &str) -> ReplacementEntry {
        ReplacementEntry {
            slot_number,
            original_subject: "X".to_string(),
            new_subject: new_subject.to_string(),
            added_at: "10:15".to_string(),
        }
    }

    #[test]
    fn weekday_index_starts_at_monday() {
        let monday = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        assert_eq!(weekday_index(monday), 0);
        assert_eq!(weekday_index(sunday), 6);
        assert_eq!(monday_of(sunday), monday);
        assert_eq!(monday_of(monday), monday);
    }

    #[test]
    fn cancellation_marker_is_case_insensitive() {
        assert!(entry(5, "Отменено").is_cancellation());
        assert!(entry(5, "ЗАНЯТИЕ ОТМЕНЕНО").is_cancellation());
        assert!(!entry(5, "Физика").is_cancellation());
        assert!(entry(2, "Перенесено на 4 пару").is_transfer());
    }

    #[test]
    fn replacement_schedule_keeps_dates_sorted_and_merged() {
        let first = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
        let second = NaiveDate::from_ymd_opt(2025, 11, 27).unwrap();
        let mut schedule = ReplacementSchedule::new("Э-2-23");
        schedule.add(first, [entry(1, "A")]);
        schedule.add(second, [entry(2, "B")]);
        schedule.add(first, [entry(3, "C")]);

        assert_eq!(schedule.days.len(), 2);
        assert_eq!(schedule.days[0].date, second);
        assert_eq!(schedule.for_date(first).len(), 2);
        assert!(schedule
            .for_date(NaiveDate::from_ymd_opt(2025, 11, 29).unwrap())
            .is_empty());
    }
}
