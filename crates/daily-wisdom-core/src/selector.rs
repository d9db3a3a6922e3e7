//! Deterministic daily selection.
//!
//! Today's item is `items[day_of_year(today) % items.len()]`. The pick is
//! recorded once per calendar day so reloads within the day return the
//! same item even if the list is reordered.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::error::{Result, WisdomError};
use crate::models::{DailySelection, Wisdom};
use crate::storage::{keys, KeyValueStore};

/// Format used for the persisted day key.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// 1-based day of the year: January 1st is 1, February 15th is 46.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Day key persisted as `lastWisdomDate`.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Index of today's item in a list of `len` items.
pub fn todays_index(today: NaiveDate, len: usize) -> Result<usize> {
    if len == 0 {
        return Err(WisdomError::NoItems);
    }
    Ok(day_of_year(today) as usize % len)
}

/// Outcome of a selection. `record` is set when the caller must persist a new pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub wisdom: &'a Wisdom,
    pub record: Option<DailySelection>,
}

/// Pick today's item given what was stored previously.
///
/// - A stored date other than today's triggers a fresh day-of-year pick.
/// - Same day with a stored id still in `items` returns that item.
/// - Otherwise the first item is returned.
///
/// # Errors
/// `WisdomError::NoItems` when `items` is empty.
pub fn select_today<'a>(
    items: &'a [Wisdom],
    today: NaiveDate,
    stored_date: Option<&str>,
    stored_id: Option<i64>,
) -> Result<Selection<'a>> {
    if items.is_empty() {
        return Err(WisdomError::NoItems);
    }

    let today_key = date_key(today);
    if stored_date != Some(today_key.as_str()) {
        let index = todays_index(today, items.len())?;
        let wisdom = &items[index];
        debug!(date = %today_key, index, id = wisdom.id, "New day, picking fresh item");
        return Ok(Selection {
            wisdom,
            record: Some(DailySelection {
                date: today_key,
                item_id: wisdom.id,
            }),
        });
    }

    let wisdom = stored_id
        .and_then(|id| items.iter().find(|w| w.id == id))
        .unwrap_or(&items[0]);

    Ok(Selection {
        wisdom,
        record: None,
    })
}

/// Read the stored `(lastWisdomDate, currentWisdomId)` pair.
pub fn load_stored(store: &dyn KeyValueStore) -> (Option<String>, Option<i64>) {
    let date = store.get(keys::LAST_WISDOM_DATE);
    let id = store.get(keys::CURRENT_WISDOM_ID).and_then(|raw| match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            warn!(value = %raw, "Ignoring non-numeric stored wisdom id");
            None
        }
    });
    (date, id)
}

pub fn save_record(store: &mut dyn KeyValueStore, record: &DailySelection) -> Result<()> {
    store.set(keys::LAST_WISDOM_DATE, &record.date)?;
    store.set(keys::CURRENT_WISDOM_ID, &record.item_id.to_string())
}

/// Select today's item and persist the pick when it is new.
pub fn select_and_persist<'a>(
    items: &'a [Wisdom],
    today: NaiveDate,
    store: &mut dyn KeyValueStore,
) -> Result<Selection<'a>> {
    let (stored_date, stored_id) = load_stored(store);
    let selection = select_today(items, today, stored_date.as_deref(), stored_id)?;
    if let Some(ref record) = selection.record {
        save_record(store, record)?;
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn items() -> Vec<Wisdom> {
        vec![
            Wisdom::new(1, "first", "History", "📜"),
            Wisdom::new(2, "second", "Science", "🔬"),
            Wisdom::new(3, "third", "Nature", "🌿"),
        ]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(date(2026, 1, 1)), 1);
        assert_eq!(day_of_year(date(2026, 2, 15)), 46);
        assert_eq!(day_of_year(date(2026, 12, 31)), 365);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366);
    }

    #[test]
    fn test_day_46_picks_second_item() {
        let items = items();
        let selection = select_today(&items, date(2026, 2, 15), None, None).unwrap();
        assert_eq!(selection.wisdom.id, 2);
        assert_eq!(
            selection.record,
            Some(DailySelection {
                date: "2026-02-15".to_string(),
                item_id: 2
            })
        );
    }

    #[test]
    fn test_same_day_returns_stored_item() {
        let items = items();
        let selection = select_today(&items, date(2026, 2, 15), Some("2026-02-15"), Some(3)).unwrap();
        assert_eq!(selection.wisdom.id, 3);
        assert!(selection.record.is_none());
    }

    #[test]
    fn test_same_day_unknown_id_falls_back_to_first() {
        let items = items();
        let selection = select_today(&items, date(2026, 2, 15), Some("2026-02-15"), Some(99)).unwrap();
        assert_eq!(selection.wisdom.id, 1);

        let selection = select_today(&items, date(2026, 2, 15), Some("2026-02-15"), None).unwrap();
        assert_eq!(selection.wisdom.id, 1);
    }

    #[test]
    fn test_stale_date_ignores_stored_id() {
        let items = items();
        // Jan 1 -> 1 % 3 = 1
        let selection = select_today(&items, date(2026, 1, 1), Some("2025-12-31"), Some(3)).unwrap();
        assert_eq!(selection.wisdom.id, 2);
        assert!(selection.record.is_some());
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let err = select_today(&[], date(2026, 2, 15), None, None).unwrap_err();
        assert!(matches!(err, WisdomError::NoItems));
        assert!(matches!(todays_index(date(2026, 2, 15), 0), Err(WisdomError::NoItems)));
    }

    #[test]
    fn test_select_and_persist_writes_once() {
        let items = items();
        let mut store = MemoryStore::new();
        let today = date(2026, 2, 15);

        let first = select_and_persist(&items, today, &mut store).unwrap();
        assert!(first.record.is_some());
        assert_eq!(store.get(keys::LAST_WISDOM_DATE).as_deref(), Some("2026-02-15"));
        assert_eq!(store.get(keys::CURRENT_WISDOM_ID).as_deref(), Some("2"));

        let second = select_and_persist(&items, today, &mut store).unwrap();
        assert!(second.record.is_none());
        assert_eq!(second.wisdom, first.wisdom);
    }

    #[test]
    fn test_non_numeric_stored_id_ignored() {
        let mut store = MemoryStore::new();
        store.set(keys::CURRENT_WISDOM_ID, "abc").unwrap();
        assert_eq!(load_stored(&store), (None, None));
    }
}
