use chrono::NaiveDate;
use mptapp_core::db::open_db_in_memory;
use mptapp_core::model::homework::{HomeworkRecord, HomeworkValidationError};
use mptapp_core::model::lesson::LessonSlot;
use mptapp_core::model::schedule::{DaySlot, ProjectedDay};
use mptapp_core::repo::homework_repo::{HomeworkRepository, SqliteHomeworkRepository};
use mptapp_core::schedule::fallback;
use mptapp_core::service::homework_service::HomeworkService;
use mptapp_core::{project, IdentityScheme, LessonVariant, RepoError, WeekTemplate};
use uuid::Uuid;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 24).unwrap()
}

fn projected(date: NaiveDate) -> ProjectedDay {
    let template = WeekTemplate {
        group_id: "Э-2-23".to_string(),
        specialty_id: "tab1".to_string(),
        week_info: fallback::week_info(),
        days: vec![DaySlot {
            reference_date: monday(),
            is_day_off: false,
            lessons: vec![
                LessonSlot::new(3, "Algebra", "Ivanov", "Нахимовский"),
                LessonSlot::new(4, "Chemistry", "Orlova", "Нахимовский")
                    .with_secondary("Biology", "Lebedev"),
            ],
        }],
    };
    project(Some(&template), date, None, IdentityScheme::V2)
}

#[test]
fn save_and_reload_homework_for_lesson() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));
    let day = projected(monday());
    let algebra = &day.lessons[0];

    let saved = service
        .save_for_lesson(algebra, LessonVariant::Primary, "  Exercises 1-5 ", "page 42", true)
        .unwrap();
    assert_eq!(saved.title, "Exercises 1-5");
    assert_eq!(saved.due_date, monday());

    let loaded = service.for_lesson(algebra.identity).unwrap().unwrap();
    assert_eq!(loaded, saved);
}

#[test]
fn saving_twice_replaces_the_record() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));
    let day = projected(monday());
    let algebra = &day.lessons[0];

    let first = service
        .save_for_lesson(algebra, LessonVariant::Primary, "Read", "", false)
        .unwrap();
    let second = service
        .save_for_lesson(algebra, LessonVariant::Primary, "Write", "essay", false)
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(service.for_day(&day).unwrap(), vec![second]);
}

#[test]
fn saving_by_identity_keeps_completion_and_moves_due_date() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));
    let day = projected(monday());
    let chemistry = &day.lessons[1];
    let lesson_id = chemistry.identity;

    service
        .save_for_lesson(chemistry, LessonVariant::Primary, "Lab report", "", false)
        .unwrap();
    service.set_completed(lesson_id, true).unwrap();

    let friday = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
    let updated = service
        .save_for_identity(lesson_id, " Lab report v2 ", "with graphs", friday, true)
        .unwrap();

    assert_eq!(updated.title, "Lab report v2");
    assert_eq!(updated.due_date, friday);
    assert!(updated.is_completed);
    assert!(updated.should_remind);
    assert_eq!(service.for_lesson(lesson_id).unwrap(), Some(updated));
}

#[test]
fn saving_by_identity_rejects_blank_title() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));

    let err = service
        .save_for_identity(Uuid::new_v4(), "   ", "", monday(), false)
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn blank_title_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHomeworkRepository::new(&conn);
    let record = HomeworkRecord::new(Uuid::new_v4(), "   ", monday());

    let err = repo.save_homework(&record).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(HomeworkValidationError::BlankTitle)
    ));
    assert_eq!(repo.get_for_lesson(record.lesson_id).unwrap(), None);
}

#[test]
fn homework_does_not_leak_into_next_week() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));
    let this_week = projected(monday());
    service
        .save_for_lesson(&this_week.lessons[0], LessonVariant::Primary, "Read", "", false)
        .unwrap();

    let next_week = projected(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    assert!(service.for_day(&next_week).unwrap().is_empty());
    assert_eq!(service.for_day(&this_week).unwrap().len(), 1);
}

#[test]
fn variants_keep_separate_homework() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));
    let day = projected(monday());
    let chemistry = &day.lessons[1];

    service
        .save_for_lesson(chemistry, LessonVariant::Primary, "Lab report", "", false)
        .unwrap();
    service
        .save_for_lesson(chemistry, LessonVariant::Secondary, "Cell diagram", "", false)
        .unwrap();

    let titles: Vec<String> = service
        .for_day(&day)
        .unwrap()
        .into_iter()
        .map(|record| record.title)
        .collect();
    assert_eq!(titles, vec!["Lab report", "Cell diagram"]);

    // Single-variant lessons key the secondary request to the primary identity.
    let algebra = &day.lessons[0];
    assert_eq!(
        HomeworkService::<SqliteHomeworkRepository>::lesson_key(algebra, LessonVariant::Secondary),
        algebra.identity
    );
}

#[test]
fn completion_toggle_and_removal() {
    let conn = open_db_in_memory().unwrap();
    let service = HomeworkService::new(SqliteHomeworkRepository::new(&conn));
    let day = projected(monday());
    let lesson_id = day.lessons[0].identity;

    assert!(matches!(
        service.set_completed(lesson_id, true),
        Err(RepoError::NotFound(_))
    ));

    service
        .save_for_lesson(&day.lessons[0], LessonVariant::Primary, "Read", "", false)
        .unwrap();
    let done = service.set_completed(lesson_id, true).unwrap();
    assert!(done.is_completed);
    assert!(service.for_lesson(lesson_id).unwrap().unwrap().is_completed);

    assert!(service.remove(lesson_id).unwrap());
    assert!(!service.remove(lesson_id).unwrap());
    assert_eq!(service.for_lesson(lesson_id).unwrap(), None);
}

#[test]
fn due_date_listing_spans_lessons() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHomeworkRepository::new(&conn);
    let day = projected(monday());
    for lesson in &day.lessons {
        let record = HomeworkRecord::new(lesson.identity, "Read", lesson.date);
        repo.save_homework(&record).unwrap();
    }

    assert_eq!(repo.list_due_on(monday()).unwrap().len(), 2);
    assert!(repo
        .list_due_on(NaiveDate::from_ymd_opt(2025, 11, 25).unwrap())
        .unwrap()
        .is_empty());
}
