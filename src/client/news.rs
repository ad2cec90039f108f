//! News feed table.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, Utc};

use crate::client::api::RetakeApi;
use crate::client::model::{NewsFeed, NewsItem};
use crate::client::projects::TABLE_SIZE;
use crate::client::state::LoadState;
use crate::client::toast::{Toast, ToastSlot};

/// Inline row shown when the feed cannot be loaded.
pub const NEWS_ERROR_ROW: &str = "Failed to load news. Please try again later.";

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

/// Newest first, at most [`TABLE_SIZE`] items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewsBoard {
    pub items: Vec<NewsItem>,
}

impl NewsBoard {
    /// Items with unparseable dates sort after every dated item.
    pub fn from_feed(feed: NewsFeed) -> Self {
        let mut items = feed.items;
        items.sort_by_key(|item| Reverse(parse_date(&item.date)));
        items.truncate(TABLE_SIZE);
        Self { items }
    }
}

#[derive(Debug, Default)]
pub struct NewsLoader {
    state: LoadState<NewsBoard>,
}

impl NewsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<NewsBoard> {
        &self.state
    }

    pub async fn load<A: RetakeApi>(&mut self, api: &A, days: u32, toasts: &mut ToastSlot) {
        self.state = LoadState::Loading;

        self.state = match api.news(days).await {
            Ok(feed) => {
                let board = NewsBoard::from_feed(feed);
                tracing::info!(items = board.items.len(), days, "News loaded");
                LoadState::Displayed(board)
            }
            Err(e) => {
                tracing::error!(error = %e, "Loading news failed");
                toasts.show(Toast::error(format!("API Error: {}", e.user_message())));
                LoadState::Failed(e)
            }
        };
    }
}
