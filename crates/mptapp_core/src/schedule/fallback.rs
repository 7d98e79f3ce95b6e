//! Bundled data served when neither network nor cache has a value.

use crate::model::catalog::{Group, Specialty, WeekInfo, WeekParity};
use crate::model::lesson::LessonSlot;
use crate::model::news::NewsItem;
use crate::model::schedule::{monday_of, DaySlot, ReplacementSchedule, WeekTemplate, SUNDAY_INDEX};
use chrono::{Days, NaiveDate};

const FALLBACK_CAMPUS: &str = "Нахимовский";

const SPECIALTIES: &[(&str, &str)] = &[
    ("mock_09.02.01", "09.02.01 Э"),
    ("mock_09.02.06", "09.02.06 СА"),
    ("mock_09.02.07_1", "09.02.07 П,Т"),
    ("mock_25.02.08", "25.02.08 БАС"),
    ("mock_10.02.05", "10.02.05 БИ"),
    ("mock_09.02.07_2", "09.02.07 ИС, БД, ВД"),
    ("mock_40.02.01", "40.02.01, 40.02.04 Ю"),
    ("mock_09.02.09", "09.02.09 ВТ"),
];

const GROUPS: &[(&str, &str)] = &[
    ("Э-1-22, Э-11/1-23", "mock_09.02.01"),
    ("Э-1-24; Э-11/1-25", "mock_09.02.01"),
    ("Э-2-23", "mock_09.02.01"),
    ("СА-2-24", "mock_09.02.06"),
    ("СА-2-23", "mock_09.02.06"),
    ("БИ50-4-23", "mock_10.02.05"),
];

const LESSONS: &[(u8, &str, &str)] = &[
    (3, "Электроника и схемотехника", "Л.В. Дробышева"),
    (
        4,
        "Иностранный язык в профессиональной деятельности",
        "А.А. Сердцева, П.А. Майкова",
    ),
    (5, "Криптографические средства защиты информации", "Д.Д. Голубев"),
];

pub fn specialties() -> Vec<Specialty> {
    SPECIALTIES
        .iter()
        .map(|(id, name)| Specialty {
            id: (*id).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

/// Bundled groups of one specialty; unknown ids yield every bundled group.
pub fn groups(specialty_id: &str) -> Vec<Group> {
    let all = GROUPS.iter().map(|(name, specialty)| Group {
        id: (*name).to_string(),
        name: (*name).to_string(),
        specialty_id: (*specialty).to_string(),
    });
    if GROUPS.iter().any(|(_, specialty)| *specialty == specialty_id) {
        all.filter(|group| group.specialty_id == specialty_id).collect()
    } else {
        all.collect()
    }
}

/// Same three lessons on every working day of the week containing `today`.
pub fn week_template(group_id: &str, specialty_id: &str, today: NaiveDate) -> WeekTemplate {
    let monday = monday_of(today);
    let days = (0..u64::from(SUNDAY_INDEX))
        .filter_map(|offset| monday.checked_add_days(Days::new(offset)))
        .map(|reference_date| DaySlot {
            reference_date,
            is_day_off: false,
            lessons: LESSONS
                .iter()
                .map(|(number, subject, teacher)| {
                    LessonSlot::new(*number, *subject, *teacher, FALLBACK_CAMPUS)
                })
                .collect(),
        })
        .collect();

    WeekTemplate {
        group_id: group_id.to_string(),
        specialty_id: specialty_id.to_string(),
        week_info: week_info(),
        days,
    }
}

pub fn week_info() -> WeekInfo {
    WeekInfo {
        label: String::new(),
        parity: WeekParity::Numerator,
        parity_label: "Числитель".to_string(),
    }
}

pub fn replacements(group_id: &str) -> ReplacementSchedule {
    ReplacementSchedule::new(group_id)
}

pub fn news() -> Vec<NewsItem> {
    vec![
        NewsItem::new("00.10.2024", Some("Экскурсия"), Some("Студенты МПТ на экскурсии")),
        NewsItem::new("head", Some("Новости колледжа"), Some("Следите за событиями")),
        NewsItem::new(
            "prevyu-studenty-mpt-na-obshherossijskom-turnire-po-robototehnike-24-26.09.2025",
            Some("Робототехника"),
            Some("Студенты МПТ на всероссийском турнире"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{groups, specialties, week_template};
    use chrono::NaiveDate;

    #[test]
    fn groups_are_filtered_by_known_specialty() {
        assert_eq!(groups("mock_09.02.06").len(), 2);
        assert_eq!(groups("unknown").len(), 6);
        assert_eq!(specialties().len(), 8);
    }

    #[test]
    fn fallback_template_covers_monday_to_saturday() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 27).unwrap();
        let template = week_template("Э-2-23", "mock_09.02.01", today);
        assert_eq!(template.days.len(), 6);
        assert_eq!(template.days[0].lessons[0].start_time, "12:00");
    }
}
