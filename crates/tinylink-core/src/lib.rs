//! Core types for the tinylink URL shortener.
//!
//! This crate provides the validated short code, the stored URL record with
//! its click history, the draft entries a registration batch is made of, and
//! the clock abstraction shared by the generator and the registry.

pub mod clock;
pub mod draft;
pub mod error;
pub mod record;
pub mod shortcode;

pub use clock::{Clock, ManualClock, SystemClock};
pub use draft::{DraftEntry, Field, FieldError, ValidDraft, DEFAULT_VALIDITY_MINUTES};
pub use error::CoreError;
pub use record::{ClickEvent, UrlRecord, DEFAULT_LOCATION, DIRECT_SOURCE};
pub use shortcode::ShortCode;
