//! Data models for daily-wisdom.
//!
//! - `Wisdom`: one piece of trivia shown for a day
//! - `DailySelection`: the persisted record of today's pick
//! - `Preferences`, `NotificationTime`: user notification settings
//! - `NotificationPayload` and friends: what gets shown by the notifier

pub mod notification;
pub mod preferences;
pub mod wisdom;

pub use notification::{NotificationAction, NotificationData, NotificationPayload};
pub use preferences::{NotificationTime, Preferences};
pub use wisdom::{DailySelection, Wisdom};
