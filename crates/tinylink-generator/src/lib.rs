//! Short code generators.
//!
//! Generators only propose candidates. Checking a candidate against the codes
//! already in use, and retrying on collision, is the registry's job.

pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use tinylink_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
///
/// Implementations can vary from random tokens to sequential counters.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Generates a candidate short code.
    ///
    /// Candidates are not guaranteed to be unique.
    fn generate(&self) -> Self::Output;
}
