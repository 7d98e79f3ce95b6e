//! Teacher name extraction for the rating board.

use crate::model::schedule::WeekTemplate;

/// Splits a comma-separated teacher field into trimmed, non-empty names.
pub fn parse_teacher_names(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|name| !name.is_empty())
}

/// Every distinct teacher named in `template`, in first-seen order.
///
/// Denominator teachers are included.
pub fn teacher_names_from_template(template: &WeekTemplate) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for slot in template.lessons() {
        let fields = std::iter::once(slot.teacher_primary.as_str())
            .chain(slot.teacher_secondary.as_deref());
        for name in fields.flat_map(parse_teacher_names) {
            if !names.iter().any(|known| known == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::{parse_teacher_names, teacher_names_from_template};
    use crate::model::catalog::WeekInfo;
    use crate::model::lesson::LessonSlot;
    use crate::model::schedule::{DaySlot, WeekTemplate};
    use chrono::NaiveDate;

    #[test]
    fn splits_and_trims_names() {
        let names: Vec<&str> = parse_teacher_names(" А.А. Сердцева, П.А. Майкова ,, ").collect();
        assert_eq!(names, vec!["А.А. Сердцева", "П.А. Майкова"]);
    }

    #[test]
    fn template_names_are_deduplicated_in_order() {
        let template = WeekTemplate {
            group_id: "g".to_string(),
            specialty_id: "s".to_string(),
            week_info: WeekInfo {
                label: String::new(),
                parity: Default::default(),
                parity_label: String::new(),
            },
            days: vec![DaySlot {
                reference_date: NaiveDate::from_ymd_opt(2025, 11, 24).unwrap(),
                is_day_off: false,
                lessons: vec![
                    LessonSlot::new(1, "Math", "Ivanov, Petrov", "N"),
                    LessonSlot::new(2, "Physics", "Petrov", "N").with_secondary("Optics", "Smirnov"),
                ],
            }],
        };

        assert_eq!(
            teacher_names_from_template(&template),
            vec!["Ivanov", "Petrov", "Smirnov"]
        );
    }
}
