use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Source recorded for a click that carries no referrer.
pub const DIRECT_SOURCE: &str = "Direct";

/// Location recorded for clicks unless configured otherwise.
/// No geolocation lookup ever happens.
pub const DEFAULT_LOCATION: &str = "Simulated Location";

/// A single simulated visit of a shortened URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// When the click was recorded.
    pub timestamp: Timestamp,
    /// The referrer, or [`DIRECT_SOURCE`].
    pub source: String,
    /// A placeholder location string.
    pub location: String,
}

impl ClickEvent {
    /// Creates a click event. A missing or blank referrer becomes
    /// [`DIRECT_SOURCE`].
    pub fn new(timestamp: Timestamp, referrer: Option<&str>, location: impl Into<String>) -> Self {
        let source = referrer
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DIRECT_SOURCE)
            .to_string();

        Self {
            timestamp,
            source,
            location: location.into(),
        }
    }
}

/// A shortened URL held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub long_url: String,
    /// The code the URL is reachable under.
    pub shortcode: ShortCode,
    /// When the record was registered.
    pub created_at: Timestamp,
    /// When the record stops being valid. Informational only, nothing
    /// enforces it.
    pub expires_at: Timestamp,
    clicks: Vec<ClickEvent>,
}

impl UrlRecord {
    pub fn new(
        shortcode: ShortCode,
        long_url: impl Into<String>,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            long_url: long_url.into(),
            shortcode,
            created_at,
            expires_at,
            clicks: Vec::new(),
        }
    }

    /// Click history, oldest first.
    pub fn clicks(&self) -> &[ClickEvent] {
        &self.clicks
    }

    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    pub fn last_click(&self) -> Option<&ClickEvent> {
        self.clicks.last()
    }

    /// Appends a click. The history can only grow.
    pub fn push_click(&mut self, click: ClickEvent) {
        self.clicks.push(click);
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}
