use chrono::{Datelike, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::cache::CacheManager;
use crate::catalog::{parse_catalog, CATALOG_PATH};
use crate::models::{NotificationPayload, Preferences, Wisdom};
use crate::selector::todays_index;

use super::payload::{daily_payload, ACTION_CLOSE, ACTION_OPEN, APP_URL};

/// Tag of the periodic background sync that drives the daily notification.
pub const DAILY_SYNC_TAG: &str = "daily-wisdom-sync";

const FALLBACK_TEXT: &str = "Discover a fascinating new piece of wisdom today!";

/// Today's item computed from the cached catalog, or a generic item if the cache has none.
pub fn todays_wisdom_from_cache(cache: &CacheManager, now: NaiveDateTime) -> Wisdom {
    let items = match cache.lookup(CATALOG_PATH) {
        Some(resource) => match parse_catalog(&resource.body) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Cached catalog unusable for notification");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    match todays_index(now.date(), items.len()) {
        Ok(index) => items[index].clone(),
        Err(_) => {
            debug!(day = now.ordinal(), "No cached catalog, using fallback notification text");
            Wisdom::new(0, FALLBACK_TEXT, "Daily Wisdom", "✨")
        }
    }
}

/// Periodic check: returns the notification to show when enabled and `now` is the
/// configured minute.
pub fn daily_tick(
    tag: &str,
    now: NaiveDateTime,
    prefs: &Preferences,
    cache: &CacheManager,
) -> Option<NotificationPayload> {
    if tag != DAILY_SYNC_TAG {
        debug!(tag, "Ignoring unknown sync tag");
        return None;
    }
    if !prefs.notifications_enabled {
        return None;
    }
    if !prefs.notification_time.matches(&now) {
        return None;
    }

    let wisdom = todays_wisdom_from_cache(cache, now);
    info!(id = wisdom.id, time = %prefs.notification_time, "Sending daily notification");
    Some(daily_payload(&wisdom))
}

/// What to do after a notification click. The notification is always closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    OpenWindow(String),
    Dismiss,
}

pub fn handle_click(action: Option<&str>) -> ClickOutcome {
    info!(action = action.unwrap_or(""), "Notification clicked");
    match action {
        None | Some("") | Some(ACTION_OPEN) => ClickOutcome::OpenWindow(APP_URL.to_string()),
        Some(ACTION_CLOSE) => ClickOutcome::Dismiss,
        Some(other) => {
            debug!(action = other, "Unknown notification action");
            ClickOutcome::Dismiss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_click() {
        assert_eq!(handle_click(None), ClickOutcome::OpenWindow("/".to_string()));
        assert_eq!(handle_click(Some("open")), ClickOutcome::OpenWindow("/".to_string()));
        assert_eq!(handle_click(Some("")), ClickOutcome::OpenWindow("/".to_string()));
        assert_eq!(handle_click(Some("close")), ClickOutcome::Dismiss);
        assert_eq!(handle_click(Some("snooze")), ClickOutcome::Dismiss);
    }
}
