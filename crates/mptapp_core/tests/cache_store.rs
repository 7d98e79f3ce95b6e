use chrono::{NaiveDate, NaiveDateTime};
use mptapp_core::db::open_db_in_memory;
use mptapp_core::model::rating::{LedgerMode, VoteKind};
use mptapp_core::repo::cache_repo::SqliteCacheRepository;
use mptapp_core::repo::rating_repo::{RatingRepository, SqliteRatingRepository};
use mptapp_core::sync::resource::{ResourceKey, ResourceKind};
use mptapp_core::{CacheStore, ManualClock};
use std::time::Duration;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 24)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn groups_key() -> ResourceKey {
    ResourceKey::scoped(ResourceKind::Groups, "tab1")
}

#[test]
fn freshness_boundary_is_exclusive() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(start());
    let store = CacheStore::new(SqliteCacheRepository::new(&conn), &clock);

    store.put(&groups_key(), &vec!["Э-2-23"]).unwrap();
    clock.advance(DAY - Duration::from_millis(1));
    assert!(store.is_fresh(&groups_key(), DAY));

    clock.advance(Duration::from_millis(1));
    assert!(!store.is_fresh(&groups_key(), DAY));
    assert_eq!(store.age_of(&groups_key()), Some(DAY));
}

#[test]
fn absent_entry_is_distinct_from_stale_entry() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(start());
    let store = CacheStore::new(SqliteCacheRepository::new(&conn), &clock);

    assert!(!store.contains(&groups_key()));
    assert_eq!(store.age_of(&groups_key()), None);
    assert_eq!(store.get::<Vec<String>>(&groups_key()), None);

    store.put(&groups_key(), &vec!["Э-2-23"]).unwrap();
    clock.advance(DAY * 3);
    assert!(store.contains(&groups_key()));
    assert!(!store.is_fresh(&groups_key(), DAY));
    assert_eq!(
        store.get::<Vec<String>>(&groups_key()),
        Some(vec!["Э-2-23".to_string()])
    );
}

#[test]
fn put_replaces_value_and_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(start());
    let store = CacheStore::new(SqliteCacheRepository::new(&conn), &clock);

    store.put(&groups_key(), &vec!["old"]).unwrap();
    clock.advance(DAY * 2);
    store.put(&groups_key(), &vec!["new"]).unwrap();

    let entry = store.entry::<Vec<String>>(&groups_key()).unwrap();
    assert_eq!(entry.key, "groups:tab1");
    assert_eq!(entry.value, vec!["new".to_string()]);
    assert!(store.is_fresh(&groups_key(), DAY));
}

#[test]
fn undecodable_payload_reads_as_absent_value() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(start());
    let store = CacheStore::new(SqliteCacheRepository::new(&conn), &clock);

    store.put(&groups_key(), &"not a list").unwrap();
    assert_eq!(store.get::<Vec<String>>(&groups_key()), None);
}

#[test]
fn clear_kind_keeps_other_kinds() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(start());
    let store = CacheStore::new(SqliteCacheRepository::new(&conn), &clock);
    let schedule_key = ResourceKey::scoped(ResourceKind::Schedule, "Э-2-23");

    store.put(&groups_key(), &vec!["Э-2-23"]).unwrap();
    store.put(&schedule_key, &"template").unwrap();

    assert_eq!(store.clear_kind(ResourceKind::Groups).unwrap(), 1);
    assert!(!store.contains(&groups_key()));
    assert!(store.contains(&schedule_key));

    assert!(store.remove(&schedule_key).unwrap());
    assert!(!store.remove(&schedule_key).unwrap());
}

#[test]
fn clear_all_leaves_ratings_untouched() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(start());
    let store = CacheStore::new(SqliteCacheRepository::new(&conn), &clock);
    let ratings = SqliteRatingRepository::new(&conn);

    store.put(&groups_key(), &vec!["Э-2-23"]).unwrap();
    ratings
        .record_cast("Ivanov", "device-a", VoteKind::Like, LedgerMode::Idempotent, 0)
        .unwrap();

    assert_eq!(store.clear_all().unwrap(), 1);
    assert!(!store.contains(&groups_key()));
    let rating = ratings.get_rating("Ivanov").unwrap().unwrap();
    assert_eq!(rating.likes, 1);
    assert_eq!(
        ratings.current_vote("Ivanov", "device-a").unwrap(),
        Some(VoteKind::Like)
    );
}
