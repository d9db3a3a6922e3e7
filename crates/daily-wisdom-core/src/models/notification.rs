use serde::{Deserialize, Serialize};

/// Notification shown to the user, mirroring the web Notification options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub tag: String,
    #[serde(default)]
    pub require_interaction: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    pub data: NotificationData,
}

/// A button on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct NotificationData {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_names() {
        let payload = NotificationPayload {
            title: "t".to_string(),
            body: "b".to_string(),
            icon: "i".to_string(),
            badge: "g".to_string(),
            vibrate: vec![200, 100, 200],
            tag: "daily-wisdom".to_string(),
            require_interaction: false,
            actions: Vec::new(),
            data: NotificationData { url: "/".to_string() },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["requireInteraction"], false);
        assert_eq!(json["data"]["url"], "/");
        assert!(json.get("actions").is_none());
    }
}
