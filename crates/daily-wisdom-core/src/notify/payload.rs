use crate::models::{NotificationAction, NotificationData, NotificationPayload, Wisdom};
use crate::utils::truncate_string;

/// Tag shared by every notification so a new one replaces the last.
pub const NOTIFICATION_TAG: &str = "daily-wisdom";

const PUSH_TITLE: &str = "✨ Daily Wisdom";
const DAILY_TITLE: &str = "✨ Your wisdom of the day";
const DEFAULT_PUSH_BODY: &str = "Discover today's wisdom!";

const ICON_URL: &str = "https://api.dicebear.com/7.x/shapes/svg?seed=wisdom&backgroundColor=FF6B9D";
const BADGE_URL: &str = "https://api.dicebear.com/7.x/shapes/svg?seed=badge&backgroundColor=FF6B9D";
const OPEN_ICON_URL: &str = "https://api.dicebear.com/7.x/shapes/svg?seed=open&backgroundColor=10B981";
const CLOSE_ICON_URL: &str = "https://api.dicebear.com/7.x/shapes/svg?seed=close&backgroundColor=EF4444";

const VIBRATE_PATTERN: [u32; 3] = [200, 100, 200];

/// Characters of the item text kept in the daily notification body.
const DAILY_BODY_CHARS: usize = 100;

pub const ACTION_OPEN: &str = "open";
pub const ACTION_CLOSE: &str = "close";

/// URL opened when the user follows a notification.
pub const APP_URL: &str = "/";

fn base_payload(title: &str, body: String) -> NotificationPayload {
    NotificationPayload {
        title: title.to_string(),
        body,
        icon: ICON_URL.to_string(),
        badge: BADGE_URL.to_string(),
        vibrate: VIBRATE_PATTERN.to_vec(),
        tag: NOTIFICATION_TAG.to_string(),
        require_interaction: false,
        actions: Vec::new(),
        data: NotificationData {
            url: APP_URL.to_string(),
        },
    }
}

/// Payload for an incoming push. `data` is the push message text, if any.
pub fn push_payload(data: Option<&str>) -> NotificationPayload {
    let body = data
        .filter(|text| !text.is_empty())
        .unwrap_or(DEFAULT_PUSH_BODY)
        .to_string();

    let mut payload = base_payload(PUSH_TITLE, body);
    payload.actions = vec![
        NotificationAction {
            action: ACTION_OPEN.to_string(),
            title: "Read now".to_string(),
            icon: OPEN_ICON_URL.to_string(),
        },
        NotificationAction {
            action: ACTION_CLOSE.to_string(),
            title: "Later".to_string(),
            icon: CLOSE_ICON_URL.to_string(),
        },
    ];
    payload
}

/// Payload for the scheduled daily notification.
pub fn daily_payload(wisdom: &Wisdom) -> NotificationPayload {
    let preview: String = wisdom.text.chars().take(DAILY_BODY_CHARS).collect();
    base_payload(DAILY_TITLE, format!("{}...", preview))
}

/// One-line summary of a payload for logs and terminal output.
pub fn summary(payload: &NotificationPayload) -> String {
    format!("{}: {}", payload.title, truncate_string(&payload.body, 60))
}
