use chrono::{Datelike, NaiveDate};
use daily_wisdom_core::selector::{select_and_persist, todays_index};
use daily_wisdom_core::storage::keys;
use daily_wisdom_core::{
    day_of_year, select_today, CatalogOrigin, DailyWisdom, FileStore, KeyValueStore, MemoryStore,
    NotificationTime, Preferences, Wisdom, WisdomError,
};
use tempfile::TempDir;

fn items(n: i64) -> Vec<Wisdom> {
    (1..=n)
        .map(|id| Wisdom::new(id, format!("item {id}"), "Test", "🧪"))
        .collect()
}

#[test]
fn every_day_of_year_picks_ordinal_mod_len_once() {
    for n in [1, 3, 7] {
        let items = items(n);
        let mut store = MemoryStore::new();
        let mut day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        while day.year() == 2026 {
            let expected = &items[(day_of_year(day) as usize) % items.len()];

            let first = select_and_persist(&items, day, &mut store).unwrap();
            assert_eq!(first.wisdom, expected, "{day} with {n} items");
            assert!(first.record.is_some(), "first call on {day} must persist");

            let again = select_and_persist(&items, day, &mut store).unwrap();
            assert_eq!(again.wisdom, expected);
            assert!(again.record.is_none(), "second call on {day} must not persist");

            day = day.succ_opt().unwrap();
        }
    }
}

#[test]
fn day_46_of_non_leap_year_selects_second_item() {
    let day = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();
    assert_eq!(day_of_year(day), 46);
    assert_eq!(todays_index(day, 3).unwrap(), 1);

    let items = items(3);
    assert_eq!(select_today(&items, day, None, None).unwrap().wisdom.id, 2);
}

#[test]
fn empty_list_is_explicit_failure() {
    let day = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();
    let mut store = MemoryStore::new();
    let err = select_and_persist(&[], day, &mut store).unwrap_err();
    assert!(matches!(err, WisdomError::NoItems));
    // nothing persisted on failure
    assert_eq!(store.get(keys::LAST_WISDOM_DATE), None);
}

#[test]
fn pick_is_stable_across_reloads_even_if_list_reorders() {
    let dir = TempDir::new().unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let items = items(5);

    let first_id = {
        let store = FileStore::open(dir.path()).unwrap();
        let app = DailyWisdom::from_items(store, items.clone(), CatalogOrigin::File, day).unwrap();
        app.current().id
    };

    let mut reordered = items;
    reordered.reverse();
    let store = FileStore::open(dir.path()).unwrap();
    let app = DailyWisdom::from_items(store, reordered, CatalogOrigin::File, day).unwrap();
    assert_eq!(app.current().id, first_id);
}

#[test]
fn preferences_round_trip_through_file_store() {
    let dir = TempDir::new().unwrap();
    let prefs = Preferences {
        notifications_enabled: true,
        notification_time: NotificationTime::new(6, 5).unwrap(),
    };

    {
        let mut store = FileStore::open(dir.path()).unwrap();
        prefs.save(&mut store).unwrap();
    }

    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(Preferences::load(&store), prefs);
    assert_eq!(store.get(keys::NOTIFICATION_TIME).as_deref(), Some("06:05"));
}
