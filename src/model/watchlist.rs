use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type GroupId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub ticker: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WatchlistItem {
    pub fn new(ticker: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: None,
            ticker: ticker.into(),
            name,
            created_at: None,
        }
    }
}

/// A named, coloured list of tracked tickers. Items are unique by ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistGroup {
    pub id: GroupId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub items: Vec<WatchlistItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WatchlistGroup {
    pub fn contains(&self, ticker: &str) -> bool {
        self.items.iter().any(|i| i.ticker == ticker)
    }

    /// Insert or replace the item with the same ticker. Returns `true` when the
    /// ticker was not present before.
    pub fn upsert_item(&mut self, item: WatchlistItem) -> bool {
        match self.items.iter_mut().find(|i| i.ticker == item.ticker) {
            Some(existing) => {
                *existing = item;
                false
            }
            None => {
                self.items.push(item);
                true
            }
        }
    }

    pub fn remove_item(&mut self, ticker: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.ticker != ticker);
        self.items.len() != before
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|i| i.ticker.as_str())
    }
}

/// Partial update for a group; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl GroupPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}

pub const LIST_COLORS: [&str; 10] = [
    "#6366f1", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#ec4899", "#f97316",
    "#14b8a6", "#a855f7",
];

/// Colour for the next list given how many lists already exist.
pub fn next_list_color(existing: usize) -> &'static str {
    LIST_COLORS[existing % LIST_COLORS.len()]
}
