use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};
use tinylink_core::{DraftEntry, FieldError, ShortCode};
use tinylink_registry::{UrlDetail, UrlSummary};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Turns registry views into text for the terminal.
#[derive(Debug, Clone)]
pub struct Renderer {
    base_url: String,
    tz: TimeZone,
    width: Option<u16>,
}

impl Renderer {
    pub fn new(base_url: impl Into<String>, tz: TimeZone) -> Self {
        Self {
            base_url: base_url.into(),
            tz,
            width: None,
        }
    }

    /// Fixes the table width instead of following the terminal.
    #[cfg(test)]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn short_url(&self, code: &ShortCode) -> String {
        code.to_url(&self.base_url)
    }

    pub fn timestamp(&self, ts: Timestamp) -> String {
        ts.to_zoned(self.tz.clone())
            .strftime(TIMESTAMP_FORMAT)
            .to_string()
    }

    /// The statistics listing: one row per record.
    pub fn listing(&self, rows: &[UrlSummary], now: Timestamp) -> String {
        if rows.is_empty() {
            return "No shortened URLs yet.".to_string();
        }

        let mut table = self.new_table();
        table.set_header(vec![
            "Short URL",
            "Original URL",
            "Clicks",
            "Last click",
            "Created",
            "Expires",
        ]);

        for row in rows {
            table.add_row(vec![
                self.short_url(&row.shortcode),
                row.long_url.clone(),
                row.click_count.to_string(),
                row.last_click_at
                    .map(|ts| self.timestamp(ts))
                    .unwrap_or_else(|| "-".to_string()),
                self.timestamp(row.created_at),
                time_left(row.expires_at, now),
            ]);
        }

        table.to_string()
    }

    /// The detail page of one record with its click table, limited to the
    /// `last` most recent clicks when given.
    pub fn detail(&self, detail: &UrlDetail, now: Timestamp, last: Option<usize>) -> String {
        let mut out = String::new();

        out.push_str(&format!("Statistics for {}\n", detail.shortcode));
        out.push_str(&format!("  Short URL:    {}\n", self.short_url(&detail.shortcode)));
        out.push_str(&format!("  Original URL: {}\n", detail.long_url));
        out.push_str(&format!("  Created:      {}\n", self.timestamp(detail.created_at)));
        out.push_str(&format!(
            "  Expires:      {} ({})\n",
            self.timestamp(detail.expires_at),
            time_left(detail.expires_at, now)
        ));
        out.push_str(&format!("  Total clicks: {}\n", detail.click_count()));

        if detail.clicks.is_empty() {
            out.push_str("No clicks recorded yet.");
            return out;
        }

        let clicks = match last {
            Some(n) => detail.recent_clicks(n),
            None => detail.clicks.as_slice(),
        };
        if clicks.len() < detail.click_count() {
            out.push_str(&format!(
                "Showing the last {} of {} clicks\n",
                clicks.len(),
                detail.click_count()
            ));
        }

        let mut table = self.new_table();
        table.set_header(vec!["Timestamp", "Location", "Source"]);
        for click in clicks {
            table.add_row(vec![
                self.timestamp(click.timestamp),
                click.location.clone(),
                click.source.clone(),
            ]);
        }
        out.push_str(&table.to_string());
        out
    }

    pub fn form(&self, rows: &[DraftEntry]) -> String {
        if rows.is_empty() {
            return "The form is empty.".to_string();
        }

        let mut table = self.new_table();
        table.set_header(vec!["Row", "Original URL", "Short code", "Validity (min)"]);
        for (i, row) in rows.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                row.long_url.clone(),
                row.requested_shortcode()
                    .unwrap_or("(generated)")
                    .to_string(),
                row.validity_minutes.to_string(),
            ]);
        }
        table.to_string()
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if let Some(width) = self.width {
            table.set_width(width);
        }
        table
    }

    /// One line per field error, rows numbered from 1.
    pub fn field_errors(&self, errors: &[FieldError]) -> String {
        errors
            .iter()
            .map(|e| format!("  row {} {}: {}", e.index + 1, e.field, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `"in 29m 59s"` style remaining time, or `"expired"`.
pub fn time_left(expires_at: Timestamp, now: Timestamp) -> String {
    if now >= expires_at {
        return "expired".to_string();
    }
    // whole seconds only
    let remaining = SignedDuration::from_secs(expires_at.duration_since(now).as_secs());
    format!("in {:#}", remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinylink_core::{ClickEvent, Field};

    fn renderer() -> Renderer {
        Renderer::new("http://localhost:3000/", TimeZone::UTC).with_width(200)
    }

    fn at(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new(s).unwrap()
    }

    #[test]
    fn formats_timestamps_in_zone() {
        assert_eq!(renderer().timestamp(at(0)), "1970-01-01 00:00:00");
    }

    #[test]
    fn short_url_joins_base() {
        assert_eq!(
            renderer().short_url(&code("abcd")),
            "http://localhost:3000/abcd"
        );
    }

    #[test]
    fn time_left_before_and_after_expiry() {
        assert!(time_left(at(1_800), at(0)).starts_with("in "));
        assert_eq!(time_left(at(1_800), at(1_800)), "expired");
        assert_eq!(time_left(at(1_800), at(5_000)), "expired");
    }

    #[test]
    fn empty_listing() {
        assert_eq!(renderer().listing(&[], at(0)), "No shortened URLs yet.");
    }

    #[test]
    fn listing_has_a_row_per_record() {
        let rows = vec![
            UrlSummary {
                shortcode: code("abcd"),
                long_url: "https://a.example".to_string(),
                click_count: 7,
                created_at: at(0),
                expires_at: at(1_800),
                last_click_at: Some(at(60)),
            },
            UrlSummary {
                shortcode: code("wxyz"),
                long_url: "https://b.example".to_string(),
                click_count: 0,
                created_at: at(0),
                expires_at: at(60),
                last_click_at: None,
            },
        ];

        let text = renderer().listing(&rows, at(120));

        assert!(text.contains("http://localhost:3000/abcd"));
        assert!(text.contains("http://localhost:3000/wxyz"));
        assert!(text.contains("1970-01-01 00:01:00"));
        assert!(text.contains('7'));
        assert!(text.contains("expired"));
    }

    #[test]
    fn detail_without_clicks() {
        let detail = UrlDetail {
            shortcode: code("abcd"),
            long_url: "https://a.example".to_string(),
            created_at: at(0),
            expires_at: at(1_800),
            clicks: vec![],
        };

        let text = renderer().detail(&detail, at(0), None);

        assert!(text.contains("Statistics for abcd"));
        assert!(text.contains("Total clicks: 0"));
        assert!(text.contains("No clicks recorded yet."));
    }

    #[test]
    fn detail_lists_clicks() {
        let detail = UrlDetail {
            shortcode: code("abcd"),
            long_url: "https://a.example".to_string(),
            created_at: at(0),
            expires_at: at(1_800),
            clicks: vec![
                ClickEvent::new(at(10), None, "Simulated Location"),
                ClickEvent::new(at(20), Some("https://ref.example"), "Simulated Location"),
            ],
        };

        let text = renderer().detail(&detail, at(30), None);

        assert!(text.contains("Total clicks: 2"));
        assert!(text.contains("1970-01-01 00:00:10"));
        assert!(text.contains("Direct"));
        assert!(text.contains("https://ref.example"));
    }

    #[test]
    fn detail_limits_to_recent_clicks() {
        let detail = UrlDetail {
            shortcode: code("abcd"),
            long_url: "https://a.example".to_string(),
            created_at: at(0),
            expires_at: at(1_800),
            clicks: vec![
                ClickEvent::new(at(10), Some("https://old.example"), "Simulated Location"),
                ClickEvent::new(at(20), Some("https://mid.example"), "Simulated Location"),
                ClickEvent::new(at(30), Some("https://new.example"), "Simulated Location"),
            ],
        };

        let text = renderer().detail(&detail, at(40), Some(2));

        assert!(text.contains("Total clicks: 3"));
        assert!(text.contains("Showing the last 2 of 3 clicks"));
        assert!(!text.contains("https://old.example"));
        assert!(text.contains("https://mid.example"));
        assert!(text.contains("https://new.example"));

        let all = renderer().detail(&detail, at(40), Some(10));
        assert!(all.contains("https://old.example"));
        assert!(!all.contains("Showing the last"));
    }

    #[test]
    fn form_marks_generated_codes() {
        let rows = vec![
            DraftEntry::new("https://a.example").with_shortcode("abcd"),
            DraftEntry::new("https://b.example").with_validity(5),
        ];

        let text = renderer().form(&rows);

        assert!(text.contains("abcd"));
        assert!(text.contains("(generated)"));
        assert!(text.contains("https://b.example"));
        assert_eq!(renderer().form(&[]), "The form is empty.");
    }

    #[test]
    fn field_errors_are_one_based() {
        let text = renderer().field_errors(&[
            FieldError::new(0, Field::LongUrl, "Invalid URL format"),
            FieldError::new(2, Field::Validity, "Validity must be a positive number"),
        ]);

        assert_eq!(
            text,
            "  row 1 long_url: Invalid URL format\n  row 3 validity: Validity must be a positive number"
        );
    }
}
