//! Schedule API payload decoding.
//!
//! # Responsibility
//! - Mirror the server JSON shapes with serde DTOs.
//! - Convert them into domain models, anchoring template days to the
//!   current calendar week.
//!
//! # Invariants
//! - Any decode failure is a `FetchError::MalformedResponse`.
//! - Sunday entries and out-of-range slot numbers are dropped with a warning;
//!   day indices past Sunday fail the whole payload.

use crate::model::catalog::{Group, Specialty, WeekInfo, WeekParity};
use crate::model::lesson::LessonSlot;
use crate::model::news::NewsItem;
use crate::model::schedule::{
    monday_of, DaySlot, ReplacementEntry, ReplacementSchedule, WeekTemplate, SUNDAY_INDEX,
};
use crate::sync::source::{FetchError, FetchResult};
use chrono::{Days, NaiveDate};
use log::warn;
use serde::Deserialize;
use uuid::Uuid;

const REPLACEMENT_DATE_FORMAT: &str = "%d.%m.%Y";
const DEFAULT_CONTENT_VERSION: &str = "1.0";

#[derive(Debug, Deserialize)]
struct ApiWeekInfo {
    date: String,
    week_type: String,
    week_type_ru: String,
}

#[derive(Debug, Deserialize)]
struct ApiSpecialty {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiGroup {
    id: String,
    name: String,
    specialty_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiLesson {
    number: i64,
    subject: String,
    teacher: String,
    #[serde(default)]
    subject_denominator: Option<String>,
    #[serde(default)]
    teacher_denominator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDay {
    day_index: i64,
    #[serde(default)]
    campus: Option<String>,
    lessons: Vec<ApiLesson>,
    is_day_off: bool,
}

#[derive(Debug, Deserialize)]
struct ApiWeekSchedule {
    group: String,
    specialty_id: String,
    days: Vec<ApiDay>,
}

#[derive(Debug, Deserialize)]
struct ApiScheduleResponse {
    week_info: ApiWeekInfo,
    schedule: ApiWeekSchedule,
}

#[derive(Debug, Deserialize)]
struct ApiReplacement {
    pair_number: i64,
    original_subject: String,
    new_subject: String,
    added_at: String,
}

#[derive(Debug, Deserialize)]
struct ApiGroupReplacements {
    group_name: String,
    replacements: Vec<ApiReplacement>,
}

#[derive(Debug, Deserialize)]
struct ApiReplacementDay {
    date: String,
    groups: Vec<ApiGroupReplacements>,
}

#[derive(Debug, Deserialize)]
struct ApiReplacementsResponse {
    days: Vec<ApiReplacementDay>,
}

#[derive(Debug, Deserialize)]
struct ApiContentVersion {
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiNewsItem {
    id: String,
    #[serde(rename = "imageName")]
    image_name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiNewsResponse {
    #[serde(default)]
    news: Vec<ApiNewsItem>,
}

impl From<ApiWeekInfo> for WeekInfo {
    fn from(value: ApiWeekInfo) -> Self {
        Self {
            label: value.date,
            parity: WeekParity::from_tag(&value.week_type),
            parity_label: value.week_type_ru,
        }
    }
}

pub fn decode_week_info(body: &str) -> FetchResult<WeekInfo> {
    let info: ApiWeekInfo = serde_json::from_str(body)?;
    Ok(info.into())
}

/// Decodes a week schedule and anchors each day to the week of `today`.
pub fn decode_week_template(body: &str, today: NaiveDate) -> FetchResult<WeekTemplate> {
    let response: ApiScheduleResponse = serde_json::from_str(body)?;
    let monday = monday_of(today);

    let mut days = Vec::with_capacity(response.schedule.days.len());
    for day in response.schedule.days {
        let index = u8::try_from(day.day_index)
            .ok()
            .filter(|index| *index <= SUNDAY_INDEX)
            .ok_or_else(|| {
                FetchError::MalformedResponse(format!("day_index out of range: {}", day.day_index))
            })?;
        if index == SUNDAY_INDEX {
            warn!(
                "event=schedule_decode module=schedule status=skipped reason=sunday lessons={}",
                day.lessons.len()
            );
            continue;
        }
        let reference_date = monday
            .checked_add_days(Days::new(u64::from(index)))
            .ok_or_else(|| FetchError::MalformedResponse("reference date overflow".to_string()))?;
        let campus = day.campus.unwrap_or_default();
        let lessons = day
            .lessons
            .into_iter()
            .filter_map(|lesson| lesson_slot(lesson, &campus))
            .collect();

        days.push(DaySlot {
            reference_date,
            is_day_off: day.is_day_off,
            lessons,
        });
    }

    Ok(WeekTemplate {
        group_id: response.schedule.group,
        specialty_id: response.schedule.specialty_id,
        week_info: response.week_info.into(),
        days,
    })
}

fn lesson_slot(lesson: ApiLesson, campus: &str) -> Option<LessonSlot> {
    let Ok(number) = u8::try_from(lesson.number) else {
        warn!(
            "event=schedule_decode module=schedule status=skipped reason=slot_out_of_range number={}",
            lesson.number
        );
        return None;
    };
    let mut slot = LessonSlot::new(number, lesson.subject, lesson.teacher, campus);
    if slot.validate().is_err() {
        warn!(
            "event=schedule_decode module=schedule status=skipped reason=slot_out_of_range number={number}"
        );
        return None;
    }
    if let Some(subject) = lesson.subject_denominator {
        slot = slot.with_secondary(subject, lesson.teacher_denominator.unwrap_or_default());
    }
    Some(slot)
}

/// Decodes replacements and keeps only those published for `group_id`.
pub fn decode_replacements(body: &str, group_id: &str) -> FetchResult<ReplacementSchedule> {
    let response: ApiReplacementsResponse = serde_json::from_str(body)?;
    let mut schedule = ReplacementSchedule::new(group_id);

    for day in response.days {
        let date = NaiveDate::parse_from_str(day.date.trim(), REPLACEMENT_DATE_FORMAT)
            .map_err(|_| FetchError::MalformedResponse(format!("invalid date `{}`", day.date)))?;
        let entries: Vec<ReplacementEntry> = day
            .groups
            .into_iter()
            .filter(|group| group.group_name.trim() == group_id)
            .flat_map(|group| group.replacements)
            .filter_map(|replacement| {
                let slot_number = u8::try_from(replacement.pair_number).ok()?;
                Some(ReplacementEntry {
                    slot_number,
                    original_subject: replacement.original_subject,
                    new_subject: replacement.new_subject,
                    added_at: replacement.added_at,
                })
            })
            .collect();
        if !entries.is_empty() {
            schedule.add(date, entries);
        }
    }

    Ok(schedule)
}

pub fn decode_specialties(body: &str) -> FetchResult<Vec<Specialty>> {
    let items: Vec<ApiSpecialty> = serde_json::from_str(body)?;
    Ok(items
        .into_iter()
        .map(|item| Specialty {
            id: item.id,
            name: item.name,
        })
        .collect())
}

pub fn decode_groups(body: &str) -> FetchResult<Vec<Group>> {
    let items: Vec<ApiGroup> = serde_json::from_str(body)?;
    Ok(items
        .into_iter()
        .map(|item| Group {
            id: item.id,
            name: item.name,
            specialty_id: item.specialty_id,
        })
        .collect())
}

/// Missing `version` decodes to the server default token.
pub fn decode_content_version(body: &str) -> FetchResult<String> {
    let response: ApiContentVersion = serde_json::from_str(body)?;
    Ok(response
        .version
        .unwrap_or_else(|| DEFAULT_CONTENT_VERSION.to_string()))
}

pub fn decode_news(body: &str) -> FetchResult<Vec<NewsItem>> {
    let response: ApiNewsResponse = serde_json::from_str(body)?;
    Ok(response
        .news
        .into_iter()
        .map(|item| NewsItem {
            id: Uuid::parse_str(&item.id).unwrap_or_else(|_| Uuid::new_v4()),
            image_name: item.image_name,
            title: item.title,
            description: item.description,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{
        decode_content_version, decode_replacements, decode_specialties, decode_week_template,
    };
    use crate::model::catalog::WeekParity;
    use crate::sync::source::FetchError;
    use chrono::NaiveDate;

    const SCHEDULE_BODY: &str = r#"{
        "week_info": {"date": "27 Ноября - Четверг", "week_type": "denominator", "week_type_ru": "Знаменатель"},
        "schedule": {
            "group": "Э-2-23",
            "specialty_id": "tab1",
            "days": [
                {"day": "ПОНЕДЕЛЬНИК", "day_index": 0, "campus": "Нахимовский", "is_day_off": false,
                 "lessons": [
                    {"number": 3, "subject": "Algebra", "teacher": "Ivanov"},
                    {"number": 9, "subject": "Ghost", "teacher": "Nobody"}
                 ]},
                {"day": "ВТОРНИК", "day_index": 1, "campus": null, "is_day_off": false,
                 "lessons": [
                    {"number": 1, "subject": "Physics", "teacher": "Sidorov",
                     "subject_denominator": "Optics", "teacher_denominator": "Smirnov"}
                 ]}
            ]
        }
    }"#;

    #[test]
    fn template_days_are_anchored_to_current_week() {
        let thursday = NaiveDate::from_ymd_opt(2025, 11, 27).unwrap();
        let template = decode_week_template(SCHEDULE_BODY, thursday).unwrap();

        assert_eq!(template.week_info.parity, WeekParity::Denominator);
        assert_eq!(template.days[0].reference_date, NaiveDate::from_ymd_opt(2025, 11, 24).unwrap());
        assert_eq!(template.days[1].reference_date, NaiveDate::from_ymd_opt(2025, 11, 25).unwrap());
        assert_eq!(template.days[0].lessons.len(), 1);
        assert_eq!(template.days[0].lessons[0].start_time, "12:00");
        assert!(template.days[1].lessons[0].has_secondary());
        assert_eq!(template.days[1].lessons[0].campus, "");
    }

    #[test]
    fn sunday_day_is_dropped_from_template() {
        let body = r#"{"week_info": {"date": "", "week_type": "numerator", "week_type_ru": ""},
            "schedule": {"group": "g", "specialty_id": "s",
            "days": [
                {"day": "ПН", "day_index": 0, "lessons": [{"number": 1, "subject": "Art", "teacher": "Belova"}], "is_day_off": false},
                {"day": "ВС", "day_index": 6, "lessons": [], "is_day_off": true}
            ]}}"#;
        let today = NaiveDate::from_ymd_opt(2025, 11, 27).unwrap();
        let template = decode_week_template(body, today).unwrap();
        assert_eq!(template.days.len(), 1);
        assert_eq!(template.days[0].weekday_index(), 0);
        assert!(template.day_for_index(6).is_none());
    }

    #[test]
    fn day_index_past_sunday_is_malformed() {
        let body = r#"{"week_info": {"date": "", "week_type": "numerator", "week_type_ru": ""},
            "schedule": {"group": "g", "specialty_id": "s",
            "days": [{"day": "?", "day_index": 7, "lessons": [], "is_day_off": true}]}}"#;
        let today = NaiveDate::from_ymd_opt(2025, 11, 27).unwrap();
        assert!(matches!(
            decode_week_template(body, today),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn replacements_are_filtered_by_group_and_keyed_by_date() {
        let body = r#"{"days": [
            {"date": "25.11.2025", "date_display": "25 ноября", "is_today": true, "groups": [
                {"group_name": "Э-2-23", "replacements": [
                    {"pair_number": 5, "original_subject": "X", "new_subject": "Отменено", "added_at": "09:12"}
                ]},
                {"group_name": "СА-2-24", "replacements": [
                    {"pair_number": 1, "original_subject": "Y", "new_subject": "Z", "added_at": "09:13"}
                ]}
            ]}
        ]}"#;
        let schedule = decode_replacements(body, "Э-2-23").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();

        let entries = schedule.for_date(date);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_cancellation());
    }

    #[test]
    fn malformed_bodies_map_to_malformed_response() {
        assert!(matches!(
            decode_specialties("{not json"),
            Err(FetchError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_replacements(r#"{"days": [{"date": "2025-11-25", "groups": []}]}"#, "g"),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn content_version_defaults_when_missing() {
        assert_eq!(decode_content_version(r#"{"version": "7"}"#).unwrap(), "7");
        assert_eq!(decode_content_version("{}").unwrap(), "1.0");
    }
}
