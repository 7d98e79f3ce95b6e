use chrono::NaiveDate;
use mptapp_core::model::lesson::LessonSlot;
use mptapp_core::{derive_identity, IdentityFields, IdentityScheme, LessonVariant};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn algebra() -> LessonSlot {
    LessonSlot::new(3, "Algebra", "Ivanov", "Нахимовский")
}

#[test]
fn identity_is_deterministic_for_equal_inputs() {
    let monday = Some(date(2025, 11, 24));
    for scheme in [IdentityScheme::Legacy, IdentityScheme::V2] {
        let first = algebra().identity(monday, LessonVariant::Primary, scheme);
        let second = algebra().identity(monday, LessonVariant::Primary, scheme);
        assert_eq!(first, second);
    }
}

#[test]
fn same_slot_on_different_weeks_gets_distinct_identities() {
    let slot = algebra();
    let first = slot.identity(Some(date(2025, 11, 24)), LessonVariant::Primary, IdentityScheme::V2);
    let later = slot.identity(Some(date(2025, 12, 15)), LessonVariant::Primary, IdentityScheme::V2);
    assert_ne!(first, later);
}

#[test]
fn primary_and_secondary_never_collide() {
    // Identical pairs on both variants still hash apart.
    let slot = algebra().with_secondary("Algebra", "Ivanov");
    let monday = Some(date(2025, 11, 24));
    for scheme in [IdentityScheme::Legacy, IdentityScheme::V2] {
        let primary = slot.identity(monday, LessonVariant::Primary, scheme);
        let secondary = slot.identity(monday, LessonVariant::Secondary, scheme);
        assert_ne!(primary, secondary);
    }
}

#[test]
fn dateless_identity_differs_from_dated_one() {
    let slot = algebra();
    let dateless = slot.identity(None, LessonVariant::Primary, IdentityScheme::V2);
    let dated = slot.identity(Some(date(2025, 11, 24)), LessonVariant::Primary, IdentityScheme::V2);
    assert_ne!(dateless, dated);
}

#[test]
fn v2_separator_prevents_field_boundary_collisions() {
    let base = IdentityFields {
        slot_number: 1,
        subject: "ab",
        teacher: "c",
        start_time: "08:30",
        end_time: "10:00",
        campus: "Нежинская",
        date: None,
        variant: LessonVariant::Primary,
    };
    let shifted = IdentityFields {
        subject: "a",
        teacher: "bc",
        ..base
    };
    assert_ne!(
        derive_identity(&base, IdentityScheme::V2),
        derive_identity(&shifted, IdentityScheme::V2)
    );
}

#[test]
fn slot_identity_matches_free_function() {
    let slot = algebra();
    let monday = Some(date(2025, 11, 24));
    let fields = slot.identity_fields(monday, LessonVariant::Primary);
    assert_eq!(
        derive_identity(&fields, IdentityScheme::Legacy),
        slot.identity(monday, LessonVariant::Primary, IdentityScheme::Legacy)
    );
}
