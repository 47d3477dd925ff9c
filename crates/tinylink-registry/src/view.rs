use jiff::Timestamp;
use serde::Serialize;
use tinylink_core::{ClickEvent, ShortCode, UrlRecord};

/// One row of the listing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlSummary {
    pub shortcode: ShortCode,
    pub long_url: String,
    pub click_count: usize,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub last_click_at: Option<Timestamp>,
}

impl UrlSummary {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

impl From<&UrlRecord> for UrlSummary {
    fn from(record: &UrlRecord) -> Self {
        Self {
            shortcode: record.shortcode.clone(),
            long_url: record.long_url.clone(),
            click_count: record.click_count(),
            created_at: record.created_at,
            expires_at: record.expires_at,
            last_click_at: record.last_click().map(|click| click.timestamp),
        }
    }
}

/// A single record with its full click history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlDetail {
    pub shortcode: ShortCode,
    pub long_url: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub clicks: Vec<ClickEvent>,
}

impl UrlDetail {
    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// The last `n` clicks, oldest first.
    pub fn recent_clicks(&self, n: usize) -> &[ClickEvent] {
        let start = self.clicks.len().saturating_sub(n);
        &self.clicks[start..]
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

impl From<&UrlRecord> for UrlDetail {
    fn from(record: &UrlRecord) -> Self {
        Self {
            shortcode: record.shortcode.clone(),
            long_url: record.long_url.clone(),
            created_at: record.created_at,
            expires_at: record.expires_at,
            clicks: record.clicks().to_vec(),
        }
    }
}

/// Tells the caller to open `target` after a click was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub shortcode: ShortCode,
    pub target: String,
}
