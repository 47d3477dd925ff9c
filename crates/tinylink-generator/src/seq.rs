use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinylink_core::ShortCode;

/// A short code generator using a sequential counter.
///
/// This generator produces sequential codes like "tl000000", "tl000001", etc.
/// Codes are unique for the lifetime of one instance, which makes it the
/// predictable choice for demos and tests.
///
/// The prefix is not validated; a prefix that pushes codes past the maximum
/// short code length or adds invalid characters yields candidates the
/// registry will reject.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
