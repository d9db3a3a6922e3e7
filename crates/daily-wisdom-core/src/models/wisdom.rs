use serde::{Deserialize, Serialize};

/// A single piece of trivia. Loaded once from the catalog and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Wisdom {
    pub id: i64,
    pub text: String,
    pub category: String,
    pub emoji: String,
}

impl Wisdom {
    pub fn new(id: i64, text: impl Into<String>, category: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
            emoji: emoji.into(),
        }
    }

    /// Category line as shown under the text, e.g. "🔬 Science".
    pub fn display_category(&self) -> String {
        format!("{} {}", self.emoji, self.category)
    }
}

/// Which item was picked on which day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DailySelection {
    pub date: String,
    pub item_id: i64,
}
