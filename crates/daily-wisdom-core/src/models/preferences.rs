use std::fmt;
use std::str::FromStr;

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::WisdomError;
use crate::storage::{keys, KeyValueStore};

/// Default time of day for the daily notification.
pub const DEFAULT_NOTIFICATION_TIME: NotificationTime = NotificationTime { hour: 9, minute: 0 };

/// A wall-clock time of day in "HH:MM" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationTime {
    hour: u32,
    minute: u32,
}

impl NotificationTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, WisdomError> {
        if hour > 23 || minute > 59 {
            return Err(WisdomError::InvalidTime(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// True when `now` falls in the same hour and minute.
    pub fn matches<T: Timelike>(&self, now: &T) -> bool {
        now.hour() == self.hour && now.minute() == self.minute
    }
}

impl Default for NotificationTime {
    fn default() -> Self {
        DEFAULT_NOTIFICATION_TIME
    }
}

impl fmt::Display for NotificationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for NotificationTime {
    type Err = WisdomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WisdomError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || m.len() != 2 || h.len() > 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour = h.parse::<u32>().map_err(|_| invalid())?;
        let minute = m.parse::<u32>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for NotificationTime {
    type Error = WisdomError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NotificationTime> for String {
    fn from(value: NotificationTime) -> Self {
        value.to_string()
    }
}

/// User notification settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub notifications_enabled: bool,
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub notification_time: NotificationTime,
}

impl Preferences {
    /// Read preferences from the store. Missing or unparseable entries fall back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let notifications_enabled = store
            .get(keys::NOTIFICATIONS_ENABLED)
            .map(|v| v == "true")
            .unwrap_or(false);

        let notification_time = match store.get(keys::NOTIFICATION_TIME) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "Ignoring stored notification time");
                NotificationTime::default()
            }),
            None => NotificationTime::default(),
        };

        Self {
            notifications_enabled,
            notification_time,
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), WisdomError> {
        self.save_enabled(store)?;
        self.save_time(store)
    }

    pub fn save_enabled(&self, store: &mut dyn KeyValueStore) -> Result<(), WisdomError> {
        store.set(keys::NOTIFICATIONS_ENABLED, &self.notifications_enabled.to_string())
    }

    pub fn save_time(&self, store: &mut dyn KeyValueStore) -> Result<(), WisdomError> {
        store.set(keys::NOTIFICATION_TIME, &self.notification_time.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveTime;

    #[test]
    fn test_parse_notification_time() {
        let t: NotificationTime = "07:30".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 30));
        assert_eq!(t.to_string(), "07:30");

        let t: NotificationTime = "7:05".parse().unwrap();
        assert_eq!(t.to_string(), "07:05");
    }

    #[test]
    fn test_parse_notification_time_rejects_garbage() {
        for bad in ["", "0930", "24:00", "12:60", "ab:cd", "12:5", "123:00", "+9:00", "12:+5", "-1:00"] {
            assert!(bad.parse::<NotificationTime>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_matches() {
        let t: NotificationTime = "09:00".parse().unwrap();
        assert!(t.matches(&NaiveTime::from_hms_opt(9, 0, 42).unwrap()));
        assert!(!t.matches(&NaiveTime::from_hms_opt(9, 1, 0).unwrap()));
        assert!(!t.matches(&NaiveTime::from_hms_opt(21, 0, 0).unwrap()));
    }

    #[test]
    fn test_defaults_when_store_empty() {
        let store = MemoryStore::new();
        let prefs = Preferences::load(&store);
        assert!(!prefs.notifications_enabled);
        assert_eq!(prefs.notification_time.to_string(), "09:00");
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let prefs = Preferences {
            notifications_enabled: true,
            notification_time: "18:45".parse().unwrap(),
        };
        prefs.save(&mut store).unwrap();

        assert_eq!(store.get(keys::NOTIFICATIONS_ENABLED).as_deref(), Some("true"));
        assert_eq!(store.get(keys::NOTIFICATION_TIME).as_deref(), Some("18:45"));
        assert_eq!(Preferences::load(&store), prefs);
    }

    #[test]
    fn test_bad_stored_time_falls_back() {
        let mut store = MemoryStore::new();
        store.set(keys::NOTIFICATION_TIME, "noon").unwrap();
        assert_eq!(Preferences::load(&store).notification_time, DEFAULT_NOTIFICATION_TIME);
    }

    #[test]
    fn test_serde_uses_string_time() {
        let prefs = Preferences::default();
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"notificationsEnabled":false,"notificationTime":"09:00"}"#);
    }
}
