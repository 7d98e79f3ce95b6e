use chrono::NaiveDate;
use mptapp_core::model::catalog::{WeekInfo, WeekParity};
use mptapp_core::model::lesson::LessonSlot;
use mptapp_core::model::schedule::{DaySlot, ReplacementEntry, ReplacementSchedule};
use mptapp_core::{project, project_week, IdentityScheme, WeekTemplate};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

// Anchored to the week of Monday 2025-11-24.
fn template() -> WeekTemplate {
    WeekTemplate {
        group_id: "Э-2-23".to_string(),
        specialty_id: "tab1".to_string(),
        week_info: WeekInfo {
            label: "24 Ноября - Понедельник".to_string(),
            parity: WeekParity::Numerator,
            parity_label: "Числитель".to_string(),
        },
        days: vec![
            DaySlot {
                reference_date: date(11, 24),
                is_day_off: false,
                lessons: vec![
                    LessonSlot::new(3, "Algebra", "Ivanov", "Нахимовский"),
                    LessonSlot::new(5, "History", "Smirnova", "Нахимовский")
                        .with_secondary("Literature", "Kuznetsova"),
                ],
            },
            DaySlot {
                reference_date: date(11, 25),
                is_day_off: false,
                lessons: vec![LessonSlot::new(1, "Physics", "Sidorov", "Нежинская")],
            },
        ],
    }
}

fn cancellation(slot_number: u8) -> ReplacementEntry {
    ReplacementEntry {
        slot_number,
        original_subject: "History".to_string(),
        new_subject: "Отменено".to_string(),
        added_at: "23.11.2025 18:00".to_string(),
    }
}

#[test]
fn sunday_is_always_an_empty_day_off() {
    let mut replacements = ReplacementSchedule::new("Э-2-23");
    replacements.add(date(11, 30), [cancellation(1)]);

    let day = project(Some(&template()), date(11, 30), Some(&replacements), IdentityScheme::V2);
    assert!(day.is_day_off);
    assert!(day.lessons.is_empty());
    assert!(day.replacements.is_empty());

    let without_template = project(None, date(11, 30), None, IdentityScheme::V2);
    assert!(without_template.is_day_off);
}

#[test]
fn days_match_template_by_weekday_of_reference_date() {
    let tuesday = project(Some(&template()), date(12, 2), None, IdentityScheme::V2);
    assert_eq!(tuesday.lessons.len(), 1);
    assert_eq!(tuesday.lessons[0].slot.subject_primary, "Physics");
    assert_eq!(tuesday.lessons[0].date, date(12, 2));

    let wednesday = project(Some(&template()), date(12, 3), None, IdentityScheme::V2);
    assert!(wednesday.lessons.is_empty());
    assert!(!wednesday.is_day_off);
}

#[test]
fn missing_template_projects_to_empty_working_day() {
    let day = project(None, date(11, 26), None, IdentityScheme::V2);
    assert!(day.lessons.is_empty());
    assert!(!day.is_day_off);
}

#[test]
fn same_slot_three_weeks_apart_has_distinct_identity() {
    let first = project(Some(&template()), date(11, 24), None, IdentityScheme::V2);
    let later = project(Some(&template()), date(12, 15), None, IdentityScheme::V2);

    let first_algebra = &first.lessons[0];
    let later_algebra = &later.lessons[0];
    assert_eq!(first_algebra.slot, later_algebra.slot);
    assert_ne!(first_algebra.identity, later_algebra.identity);

    let again = project(Some(&template()), date(12, 15), None, IdentityScheme::V2);
    assert_eq!(again.lessons[0].identity, later_algebra.identity);
}

#[test]
fn secondary_identity_only_for_double_booked_slots() {
    let monday = project(Some(&template()), date(11, 24), None, IdentityScheme::V2);
    assert_eq!(monday.lessons[0].secondary_identity, None);

    let history = &monday.lessons[1];
    let secondary = history.secondary_identity.unwrap();
    assert_ne!(secondary, history.identity);
}

#[test]
fn cancellation_is_attached_without_changing_the_lesson() {
    let mut replacements = ReplacementSchedule::new("Э-2-23");
    replacements.add(date(11, 24), [cancellation(5)]);

    let plain = project(Some(&template()), date(11, 24), None, IdentityScheme::V2);
    let replaced = project(Some(&template()), date(11, 24), Some(&replacements), IdentityScheme::V2);

    assert_eq!(plain.lessons, replaced.lessons);
    let entries: Vec<_> = replaced.replacements_for_slot(5).collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_cancellation());
    assert_eq!(replaced.replacements_for_slot(3).count(), 0);

    let next_monday = project(Some(&template()), date(12, 1), Some(&replacements), IdentityScheme::V2);
    assert!(next_monday.replacements.is_empty());
}

#[test]
fn week_projection_runs_monday_to_sunday() {
    let week = project_week(Some(&template()), date(12, 4), None, IdentityScheme::V2);
    let dates: Vec<NaiveDate> = week.iter().map(|day| day.date).collect();
    assert_eq!(dates.first(), Some(&date(12, 1)));
    assert_eq!(dates.last(), Some(&date(12, 7)));
    assert_eq!(week.len(), 7);
    assert!(week[6].is_day_off);
    assert_eq!(week[0].lessons.len(), 2);
}
