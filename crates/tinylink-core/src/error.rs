use thiserror::Error;

/// Errors raised while validating the inputs of a shortened URL.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("url is missing")]
    MissingUrl,
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("validity must be a positive number of minutes, got {0}")]
    InvalidValidity(i64),
    #[error("validity of {0} minutes is out of range")]
    ValidityOverflow(i64),
}
