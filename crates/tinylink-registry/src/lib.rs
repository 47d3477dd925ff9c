//! In-memory URL registry.
//!
//! This crate owns the session's shortened URLs: batch registration with
//! all-or-nothing semantics, click recording, and the listing and detail
//! views. Core types are re-exported from `tinylink_core`.

pub mod error;
pub mod registry;
pub mod settings;
pub mod view;

pub use error::{RegistryError, Result};
pub use registry::Registry;
pub use settings::RegistrySettings;
pub use view::{Navigation, UrlDetail, UrlSummary};

pub use tinylink_core::{ClickEvent, DraftEntry, Field, FieldError, ShortCode, UrlRecord};
