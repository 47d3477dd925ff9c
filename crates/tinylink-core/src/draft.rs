use crate::error::{CoreError, Result};
use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use url::Url;

/// Validity applied when a draft does not say otherwise.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// One row of a registration batch, as submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEntry {
    /// The URL to shorten.
    pub long_url: String,
    /// Requested short code. `None` or a blank string asks for a generated one.
    #[serde(default)]
    pub shortcode: Option<String>,
    /// How long the short URL is meant to stay valid.
    #[serde(default = "default_validity")]
    pub validity_minutes: i64,
}

fn default_validity() -> i64 {
    DEFAULT_VALIDITY_MINUTES
}

impl DraftEntry {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            shortcode: None,
            validity_minutes: DEFAULT_VALIDITY_MINUTES,
        }
    }

    pub fn with_shortcode(mut self, shortcode: impl Into<String>) -> Self {
        self.shortcode = Some(shortcode.into());
        self
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = minutes;
        self
    }

    /// The requested short code, if one was supplied. An empty string counts
    /// as not supplied; anything else is checked verbatim.
    pub fn requested_shortcode(&self) -> Option<&str> {
        self.shortcode.as_deref().filter(|code| !code.is_empty())
    }

    /// Checks every field of the draft, reporting all problems at once.
    ///
    /// `index` is the position of the draft in its batch and `now` the
    /// registration time the expiry is computed from.
    pub fn validate(
        &self,
        index: usize,
        now: Timestamp,
    ) -> std::result::Result<ValidDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let long_url = parse_long_url(&self.long_url)
            .map_err(|e| errors.push(FieldError::from_core(index, Field::LongUrl, &e)))
            .ok();

        let shortcode = match self.requested_shortcode() {
            Some(code) => ShortCode::new(code)
                .map(Some)
                .map_err(|e| errors.push(FieldError::from_core(index, Field::Shortcode, &e)))
                .ok(),
            None => Some(None),
        };

        let expires_at = expiry(now, self.validity_minutes)
            .map_err(|e| errors.push(FieldError::from_core(index, Field::Validity, &e)))
            .ok();

        match (long_url, shortcode, expires_at) {
            (Some(long_url), Some(shortcode), Some(expires_at)) if errors.is_empty() => {
                Ok(ValidDraft {
                    index,
                    long_url,
                    shortcode,
                    expires_at,
                })
            }
            _ => Err(errors),
        }
    }
}

/// A draft that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    /// Position in the submitted batch.
    pub index: usize,
    pub long_url: String,
    /// `None` when the code still has to be generated.
    pub shortcode: Option<ShortCode>,
    pub expires_at: Timestamp,
}

/// The draft field a [`FieldError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    LongUrl,
    Shortcode,
    Validity,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::LongUrl => write!(f, "long_url"),
            Field::Shortcode => write!(f, "shortcode"),
            Field::Validity => write!(f, "validity"),
        }
    }
}

/// A validation failure tied to one field of one draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub index: usize,
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(index: usize, field: Field, message: impl Into<String>) -> Self {
        Self {
            index,
            field,
            message: message.into(),
        }
    }

    fn from_core(index: usize, field: Field, error: &CoreError) -> Self {
        let message = match error {
            CoreError::MissingUrl => "URL is required",
            CoreError::InvalidUrl { .. } => "Invalid URL format",
            CoreError::InvalidShortCode(_) => "Shortcode must be 4-20 alphanumeric chars",
            CoreError::InvalidValidity(_) => "Validity must be a positive number",
            CoreError::ValidityOverflow(_) => "Validity is too large",
        };
        Self::new(index, field, message)
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}: {}", self.index, self.field, self.message)
    }
}

/// Checks that `raw` is an absolute URL and returns it trimmed.
pub fn parse_long_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::MissingUrl);
    }

    Url::parse(trimmed).map_err(|e| CoreError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    Ok(trimmed.to_string())
}

/// Computes `now + minutes`, rejecting non-positive or out of range values.
pub fn expiry(now: Timestamp, minutes: i64) -> Result<Timestamp> {
    if minutes <= 0 {
        return Err(CoreError::InvalidValidity(minutes));
    }

    let seconds = minutes
        .checked_mul(60)
        .ok_or(CoreError::ValidityOverflow(minutes))?;

    now.checked_add(SignedDuration::from_secs(seconds))
        .map_err(|_| CoreError::ValidityOverflow(minutes))
}
