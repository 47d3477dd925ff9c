use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("invalid code length {length}; expected {min}..={max}")]
    InvalidLength { length: usize, min: usize, max: usize },
}
