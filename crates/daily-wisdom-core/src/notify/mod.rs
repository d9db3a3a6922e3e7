//! Notifications.
//!
//! - `payload`: building push and daily notification payloads
//! - `permission`: permission sources and the outcome of a toggle
//! - `daily`: the periodic check that sends today's notification, and click handling

pub mod daily;
pub mod payload;
pub mod permission;

pub use daily::{daily_tick, handle_click, todays_wisdom_from_cache, ClickOutcome, DAILY_SYNC_TAG};
pub use payload::{daily_payload, push_payload, NOTIFICATION_TAG};
pub use permission::{FixedPermission, Permission, PermissionSource, ToggleOutcome};

use crate::error::Result;
use crate::models::NotificationPayload;

/// Displays notifications to the user.
pub trait Notifier {
    fn show(&self, payload: &NotificationPayload) -> Result<()>;
}
