//! Local key-value storage.
//!
//! A small string-to-string store standing in for browser `localStorage`.
//! `FileStore` persists to a single JSON file; `MemoryStore` lives in memory.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Keys written by the app.
pub mod keys {
    pub const NOTIFICATIONS_ENABLED: &str = "notificationsEnabled";
    pub const NOTIFICATION_TIME: &str = "notificationTime";
    pub const LAST_WISDOM_DATE: &str = "lastWisdomDate";
    pub const CURRENT_WISDOM_ID: &str = "currentWisdomId";
}
