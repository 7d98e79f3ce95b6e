//! Template → calendar date projection.
//!
//! # Invariants
//! - Sundays project to an empty day off regardless of inputs.
//! - Template days are matched by the weekday of their reference date.
//! - Lesson identities are derived for the target date, so the same
//!   template slot gets a new identity every calendar week.
//! - Replacements are attached for the exact date only and never alter
//!   lesson content or identity.

use crate::model::identity::{IdentityScheme, LessonVariant};
use crate::model::lesson::LessonSlot;
use crate::model::schedule::{
    monday_of, weekday_index, ProjectedDay, ProjectedLesson, ReplacementSchedule, WeekTemplate,
    SUNDAY_INDEX,
};
use chrono::{Days, NaiveDate};

/// Projects `template` onto `date`.
///
/// A missing template (not loaded yet) projects to an empty working day.
pub fn project(
    template: Option<&WeekTemplate>,
    date: NaiveDate,
    replacements: Option<&ReplacementSchedule>,
    scheme: IdentityScheme,
) -> ProjectedDay {
    let index = weekday_index(date);
    if index == SUNDAY_INDEX {
        return ProjectedDay::empty(date, true);
    }

    let Some(day) = template.and_then(|template| template.day_for_index(index)) else {
        return ProjectedDay::empty(date, false);
    };

    ProjectedDay {
        date,
        lessons: day
            .lessons
            .iter()
            .map(|slot| project_lesson(slot, date, scheme))
            .collect(),
        replacements: replacements
            .map(|schedule| schedule.for_date(date).to_vec())
            .unwrap_or_default(),
        is_day_off: day.is_day_off,
    }
}

/// Projects the seven days Monday..Sunday of the week containing `date`.
pub fn project_week(
    template: Option<&WeekTemplate>,
    date: NaiveDate,
    replacements: Option<&ReplacementSchedule>,
    scheme: IdentityScheme,
) -> Vec<ProjectedDay> {
    let monday = monday_of(date);
    (0..=u64::from(SUNDAY_INDEX))
        .filter_map(|offset| monday.checked_add_days(Days::new(offset)))
        .map(|day| project(template, day, replacements, scheme))
        .collect()
}

fn project_lesson(slot: &LessonSlot, date: NaiveDate, scheme: IdentityScheme) -> ProjectedLesson {
    let secondary_identity = slot
        .has_secondary()
        .then(|| slot.identity(Some(date), LessonVariant::Secondary, scheme));
    ProjectedLesson {
        slot: slot.clone(),
        date,
        identity: slot.identity(Some(date), LessonVariant::Primary, scheme),
        secondary_identity,
    }
}
