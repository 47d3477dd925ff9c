use thiserror::Error;
use tinylink_core::FieldError;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Why a registry operation was refused. None of these leave the registry
/// partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("batch rejected: {} invalid field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("short code already in use: {}", .0.join(", "))]
    DuplicateShortcode(Vec<String>),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("no free short code after {attempts} generation attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("batch must hold {min} to {max} entries, got {actual}")]
    BatchSize {
        min: usize,
        max: usize,
        actual: usize,
    },
}
